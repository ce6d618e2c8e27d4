// Copyright (C) 2020-2026 Andy Kurnia.

// Per-room notification channels. Emitting on a channel nobody subscribed
// to does nothing, and emit_with does not even build the payload.

type Observer<T> = Box<dyn Fn(&T) + Send + Sync>;

pub struct Subject<T> {
    observers: Vec<Observer<T>>,
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<T> Subject<T> {
    pub fn subscribe<F: Fn(&T) + Send + Sync + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    #[inline(always)]
    pub fn is_observed(&self) -> bool {
        !self.observers.is_empty()
    }

    pub fn emit(&self, value: &T) {
        for observer in self.observers.iter() {
            observer(value);
        }
    }

    pub fn emit_with<F: FnOnce() -> T>(&self, make_value: F) {
        if self.is_observed() {
            self.emit(&make_value());
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileDrawn {
    pub player: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LettersExchanged {
    pub player: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPlaced {
    pub player: String,
    pub command: String,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSkipped {
    pub player: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementFailed {
    pub player: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnChanged {
    pub player: String,
    pub turn: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub host_score: i32,
    pub guest_score: i32,
    // None on a tie.
    pub winner: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveCompleted {
    pub player: String,
    pub description: String,
    pub bonus: i32,
}

#[derive(Default)]
pub struct RoomEvents {
    pub tile_drawn: Subject<TileDrawn>,
    pub letters_exchanged: Subject<LettersExchanged>,
    pub word_placed: Subject<WordPlaced>,
    // every word currently on the board
    pub cross_words_changed: Subject<Vec<String>>,
    pub turn_skipped: Subject<TurnSkipped>,
    pub placement_failed: Subject<PlacementFailed>,
    pub turn_changed: Subject<TurnChanged>,
    pub game_over: Subject<GameOver>,
    pub objective_completed: Subject<ObjectiveCompleted>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn unobserved_channels_do_not_build_payloads() {
        let subject = Subject::<Vec<String>>::default();
        let mut built = false;
        subject.emit_with(|| {
            built = true;
            Vec::new()
        });
        assert!(!built);
        assert!(!subject.is_observed());
    }

    #[test]
    fn every_observer_sees_every_emission() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut subject = Subject::<TurnSkipped>::default();
        for tag in 0..2 {
            let seen = Arc::clone(&seen);
            subject.subscribe(move |event: &TurnSkipped| {
                seen.lock().unwrap().push(format!("{}:{}", tag, event.player));
            });
        }
        subject.emit_with(|| TurnSkipped {
            player: "ann".into(),
        });
        assert_eq!(*seen.lock().unwrap(), vec!["0:ann", "1:ann"]);
    }
}
