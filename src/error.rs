// Copyright (C) 2020-2026 Andy Kurnia.

pub struct MyError {
    s: String,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(s: String) -> MyError {
    MyError { s }
}

// Send + Sync so errors can cross the room manager's tasks.
pub type BoxAnyError = Box<dyn std::error::Error + Send + Sync>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

// Failures the room registry reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("room {0:?} not found")]
    RoomNotFound(String),
    #[error("player {0:?} is not in this room")]
    PlayerNotInRoom(String),
    #[error("it is not {0}'s turn")]
    NotYourTurn(String),
    #[error("room is {0}, which does not allow this")]
    InvalidState(&'static str),
    #[error("room already has two players")]
    RoomFull,
    #[error("name {0:?} is taken in this room")]
    NameTaken(String),
    #[error("only the host can do that, not {0}")]
    NotHost(String),
}
