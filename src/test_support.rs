use crate::domain::events::ResizeEvent;

/// The seven resizes the `run` command submits by default.
pub fn resize_sequence() -> Vec<ResizeEvent> {
    [
        (1024, 768),
        (644, 494),
        (800, 600),
        (200, 120),
        (900, 1144),
        (500, 100),
        (2140, 4116),
    ]
    .into_iter()
    .map(|(width, height)| ResizeEvent::new(width, height))
    .collect()
}
