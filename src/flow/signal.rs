/// One message on a subscription channel.
///
/// Data and terminal outcomes share a single channel, so a terminal signal can
/// never overtake a data signal sent before it.
#[derive(Debug)]
pub(crate) enum Signal<T, E> {
    Next(T),
    Error(E),
    Complete,
}
