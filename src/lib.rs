//! Mystery Box core crate.
//!
//! A tap-to-reveal browser game: the player taps a gift box until it pops
//! open and reveals one prize "paper" drawn uniformly at random from a pool
//! kept in browser local storage. A password-gated admin page manages the
//! pool (add / edit / delete groups of identical prizes) and shows the draw
//! history. `start_game()` is the single JS entrypoint; it routes between the
//! game and admin pages by location hash.
//!
//! The data layer (`paper`, `store`, `group`, `draw`) is plain Rust and also
//! compiles natively so its logic runs under host `cargo test`; everything
//! DOM-facing lives in `app`, `game` and `admin`.

use wasm_bindgen::prelude::*;

pub mod draw;
pub mod group;
pub mod paper;
pub mod store;

mod admin;
mod app;
mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Game-wide constants
// -----------------------------------------------------------------------------

/// Local-storage key holding the active pool (JSON array of papers).
pub const POOL_STORAGE_KEY: &str = "mystery_papers_data";
/// Local-storage key holding the draw history (JSON array of papers).
pub const HISTORY_STORAGE_KEY: &str = "mystery_papers_history";

/// Taps required to pop the box open and trigger a draw.
pub const CLICKS_NEEDED: u32 = 5;

/// Admin passcode. A UI gate only, trivially bypassable via dev tools; the
/// stored papers are not protected data.
pub const ADMIN_PASSCODE: &str = "123";

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::start()
}
