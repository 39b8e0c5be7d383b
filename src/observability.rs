use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("banter.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("banter.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("banter.client.request_duration_seconds");

pub(crate) static CHAT_TURNS: Counter = Counter::new("banter.chat.turns");
pub(crate) static CHAT_TURN_FAILURES: Counter = Counter::new("banter.chat.turn_failures");
pub(crate) static HISTORY_REPLACEMENTS: Counter = Counter::new("banter.chat.history_replacements");

pub(crate) static ACTIONS_PRESENTED: Counter = Counter::new("banter.actions.presented");
pub(crate) static ACTIONS_ACTIVATED: Counter = Counter::new("banter.actions.activated");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_TURN_FAILURES);
    collector.register_counter(&HISTORY_REPLACEMENTS);

    collector.register_counter(&ACTIONS_PRESENTED);
    collector.register_counter(&ACTIONS_ACTIVATED);
}
