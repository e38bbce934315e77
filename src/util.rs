/// Lenient numeric parsing helpers.
///
/// This module provides the float parsing routines shared by the lexer (for
/// numeric literals) and by value coercion (for numeric strings). None of them
/// ever fail: text that is not a plain decimal number maps to a caller-chosen
/// fallback instead.
pub mod num;
