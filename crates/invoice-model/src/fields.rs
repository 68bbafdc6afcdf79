//! Field names shared by the normalizer and the HTTP layer.

/// CSRF token added to every form by the web layer.
pub const CSRF_TOKEN: &str = "csrf_token";

/// Client contact email.
pub const EMAIL: &str = "email";
/// Client contact first name.
pub const FIRST_NAME: &str = "first_name";
/// Client contact last name.
pub const LAST_NAME: &str = "last_name";
/// Client display name.
pub const NAME: &str = "name";
/// Nested contact mapping built from the identity fields.
pub const CONTACT: &str = "contact";

/// Identity fields merged into `contact`, in output order.
pub const CLIENT_IDENTITY_FIELDS: [&str; 3] = [EMAIL, FIRST_NAME, LAST_NAME];

/// Ordered sequence of invoice line items.
pub const INVOICE_ITEMS: &str = "invoice_items";
/// Line-item quantity (also posted at top level by the item editor).
pub const QTY: &str = "qty";
/// Line-item unit cost (also posted at top level by the item editor).
pub const COST: &str = "cost";
/// Recurrence selector for recurring invoices.
pub const RECURRING: &str = "recurring";
/// Whether the invoice should be emailed on creation.
pub const EMAIL_INVOICE: &str = "email_invoice";

/// Keys present only because of the web submission mechanism.
pub const INVOICE_TRANSPORT_FIELDS: [&str; 3] = [CSRF_TOKEN, QTY, COST];
