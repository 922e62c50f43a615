// handlers/admin/mod.rs - Super-admin operations
//
// Every route here sits behind the admin auth middleware: a verified
// token plus the super-admin subject gate. Handlers receive the
// verified AdminContext as a request extension.

pub mod dashboard; // GET   /api/admin/dashboard
pub mod tenant_list; // GET   /api/admin/tenants
pub mod tenant_toggle; // PATCH /api/admin/tenants/:id/active

pub use dashboard::dashboard;
pub use tenant_list::tenant_list;
pub use tenant_toggle::tenant_toggle_active;
