//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                     |
//! |------------|--------------|---------------------------------|
//! | `clock`    | Clock        | Host wall clock, async timer    |
//! | `log_sink` | EventSink    | `log` facade                    |
//! | `memory`   | StoragePort  | In-process map                  |

pub mod clock;
pub mod log_sink;
pub mod memory;
