use crate::listener::error::HandlerError;

/// Computes the next state from one event.
///
/// A handler is moved into the listener's worker when the listener starts and
/// is only ever called from that one thread, so `&mut self` is available
/// without locking. Returning an error halts the listener for good.
pub trait EventHandler<E, S>: Send {
    fn handle(&mut self, event: &E) -> Result<S, HandlerError>;
}

impl<E, S, F> EventHandler<E, S> for F
where
    F: FnMut(&E) -> Result<S, HandlerError> + Send,
{
    fn handle(&mut self, event: &E) -> Result<S, HandlerError> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_handlers() {
        let mut calls = 0;
        let mut handler = |event: &u32| {
            calls += 1;
            Ok::<_, HandlerError>(event * 2)
        };

        assert_eq!(EventHandler::handle(&mut handler, &21), Ok(42));
        assert_eq!(calls, 1);
    }
}
