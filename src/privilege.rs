/// True when running with an effective uid of 0.
///
/// Only used to decide whether to warn; access is never refused on this.
pub fn has_root_privileges() -> bool {
    unsafe { libc::geteuid() == 0 }
}
