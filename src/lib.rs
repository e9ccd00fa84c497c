//! Scanner for Emerald, a small indentation-sensitive scripting language.

pub mod error;
pub mod scanner;
pub mod token;

mod brackets;
mod cursor;
mod indent;

pub use crate::error::{Error, ErrorKind, Reporter};
pub use crate::indent::TAB_STOP;
pub use crate::scanner::{scan, Scanner};
pub use crate::token::{Literal, Token, TokenKind};
