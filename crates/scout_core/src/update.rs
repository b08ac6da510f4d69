use crate::{DeliveryState, Effect, Msg};

/// Pure update function: applies a message to the delivery state and returns
/// the notifications to perform.
///
/// `on_finished` fires at most once per scrape. A listener attached after
/// completion receives the stored result once and is then detached.
pub fn update(state: DeliveryState, msg: Msg) -> (DeliveryState, Vec<Effect>) {
    match (state, msg) {
        (DeliveryState::Pending { .. }, Msg::ListenerAttached) => {
            (DeliveryState::Pending { listener: true }, Vec::new())
        }
        (DeliveryState::Running { .. }, Msg::ListenerAttached) => {
            // The new listener missed the start notification.
            (
                DeliveryState::Running { listener: true },
                vec![Effect::NotifyStarted],
            )
        }
        (DeliveryState::Completed(result), Msg::ListenerAttached) => (
            DeliveryState::Delivered,
            vec![Effect::NotifyFinished(result), Effect::DetachListener],
        ),
        (DeliveryState::Delivered, Msg::ListenerAttached) => {
            (DeliveryState::Delivered, vec![Effect::DetachListener])
        }

        (DeliveryState::Pending { listener }, Msg::ScrapeStarted) => {
            let effects = if listener {
                vec![Effect::NotifyStarted]
            } else {
                Vec::new()
            };
            (DeliveryState::Running { listener }, effects)
        }
        (state, Msg::ScrapeStarted) => (state, Vec::new()),

        (
            DeliveryState::Pending { listener } | DeliveryState::Running { listener },
            Msg::ScrapeFinished(result),
        ) => {
            if listener {
                (
                    DeliveryState::Delivered,
                    vec![Effect::NotifyFinished(result), Effect::DetachListener],
                )
            } else {
                (DeliveryState::Completed(result), Vec::new())
            }
        }
        // Late or duplicate results never replace what was already produced.
        (state @ (DeliveryState::Completed(_) | DeliveryState::Delivered), Msg::ScrapeFinished(_)) => {
            (state, Vec::new())
        }
    }
}
