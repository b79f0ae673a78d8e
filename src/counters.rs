//! Animated statistics counters on the index page.

use async_trait::async_trait;

use crate::dom::{Document, ElementId};
use crate::page::{Dispatch, Effect, Event, Handler};
use crate::prelude::*;

pub const COUNTER_SELECTORS: &str = "#totalClients, #totalSegments, #accuracy, #predictions";

const DURATION: StdDuration = StdDuration::from_millis(2000);
pub const FRAME: StdDuration = StdDuration::from_millis(16);

/// Counts from zero up to the target, one item per frame. The last item is
/// always exactly the target.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    step: f64,
    current: f64,
    is_finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64) -> Self {
        let n_frames = DURATION.as_secs_f64() / FRAME.as_secs_f64();
        Self {
            target,
            step: target as f64 / n_frames,
            current: 0.0,
            is_finished: false,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished {
            return None;
        }
        self.current += self.step;
        if self.current >= self.target as f64 {
            self.is_finished = true;
            Some(self.target)
        } else {
            Some(self.current.floor() as i64)
        }
    }
}

/// Starts the counter animations once the document is ready.
pub struct CountersController;

#[async_trait]
impl Handler for CountersController {
    async fn handle(&self, event: Event, document: &mut Document, dispatch: &mut Dispatch) -> Result {
        if event != Event::Ready {
            return Ok(());
        }
        for target in document.query_selector_all(COUNTER_SELECTORS)? {
            let Some(element) = document.get(target) else { continue };
            let source = element
                .attribute("data-target")
                .unwrap_or(element.inner_html.as_str());
            match parse_int(source) {
                Some(value) => dispatch.push(Effect::AnimateCounter {
                    target,
                    animation: CounterAnimation::new(value),
                }),
                None => warn!(?target, source, "counter target is not a number"),
            }
        }
        Ok(())
    }
}

/// Plays the animation into the element's content, one frame per [`FRAME`].
pub async fn animate(document: &mut Document, target: ElementId, animation: CounterAnimation) {
    let mut interval = tokio::time::interval(FRAME);
    for value in animation {
        interval.tick().await;
        match document.get_mut(target) {
            Some(element) => element.inner_html = value.to_string(),
            None => break,
        }
    }
}

/// Integer prefix of the string, the way browsers' `parseInt` reads it.
fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let digits_start = usize::from(value.starts_with(['+', '-']));
    let digits_end = value[digits_start..]
        .find(|char_: char| !char_.is_ascii_digit())
        .map_or(value.len(), |index| digits_start + index);
    if digits_end == digits_start {
        return None;
    }
    value[..digits_end].parse().ok()
}
