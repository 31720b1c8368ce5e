//! Integration tests across every layer
//!
//! Loads script files from disk through a `Session`, queries them with the
//! `strsim` scorer, and drives the REPL with scripted input.

mod end_to_end;
