//! Frame trait for units of work.

/// A marker trait for the unit of work a hook point receives.
///
/// Frames must be `Send + Sync + 'static` so a dispatcher can be shared
/// across the execution contexts that invoke it concurrently.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Frame",
    label = "must be `Send + Sync + 'static`",
    note = "Units of work handed to a dispatcher must be thread-safe and static."
)]
pub trait Frame: Send + Sync + 'static {}

// Common Frame implementations
impl Frame for () {}
impl Frame for Vec<u8> {}
impl Frame for Box<[u8]> {}
impl Frame for &'static [u8] {}
impl<T: Frame> Frame for std::sync::Arc<T> {}
impl<T: Frame> Frame for Option<T> {}
