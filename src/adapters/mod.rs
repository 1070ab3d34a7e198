//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements  | Connects to                     |
//! |-------------|-------------|---------------------------------|
//! | `disk`      | StorePort   | `state.json` in the data dir    |
//! |             | ConfigPort  | `config.json` in the data dir   |
//! | `memory`    | StorePort   | process memory (ephemeral/test) |
//! |             | ConfigPort  |                                 |
//! | `time`      | ClockPort   | system wall clock (`chrono`)    |
//! | `log_sink`  | EventSink   | `log` facade                    |
//! | `console`   | EventSink   | stdout (needs bars)             |

pub mod console;
pub mod disk;
pub mod log_sink;
pub mod memory;
pub mod time;
