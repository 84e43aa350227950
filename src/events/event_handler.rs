/// Implemented by components that consume a stream of `T` through a subscription.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
