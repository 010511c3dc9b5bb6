//! Cross-crate integration tests: the real probe and scanner driven
//! against an in-process holder emulator on the loopback interface.
#![cfg(test)]

mod discovery;
mod emulator;
