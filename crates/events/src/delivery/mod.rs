//! External delivery channels for status notifications.

pub mod webhook;
