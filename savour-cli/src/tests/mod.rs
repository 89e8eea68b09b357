//! Shared test harness modules for the Savour CLI.

use super::*;

mod helpers;
