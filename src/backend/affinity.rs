/// Pins the calling thread to core `index mod cores`.
///
/// Pinning is best effort: a platform without affinity support just leaves the
/// thread where the scheduler put it.
pub fn pin_worker(index: usize) {
    let Some(cores) = core_affinity::get_core_ids() else {
        tracing::debug!(index, "core ids unavailable, worker not pinned");
        return;
    };
    if cores.is_empty() {
        return;
    }
    let core = cores[index % cores.len()];
    if !core_affinity::set_for_current(core) {
        tracing::debug!(index, core = core.id, "failed to pin worker");
    }
}
