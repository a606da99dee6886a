//! App shell: shared state, hash routing and the ambient background.
//!
//! The shell owns the one `PaperStore` handle (keys injected here, nothing
//! ambient) plus per-page UI state, all behind a `thread_local` cell that the
//! event closures borrow per call. Routing mirrors a hash router: `#/` is the
//! game page, `#/admin` the admin panel, and a `hashchange` listener
//! re-renders the page root in place.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::game::confetti::Lcg;
use crate::store::{LocalStorage, PaperStore};
use crate::{HISTORY_STORAGE_KEY, POOL_STORAGE_KEY, admin, game, paper};

/// Shared application state: the store handle plus per-page UI state.
pub struct App {
    pub store: PaperStore<LocalStorage>,
    pub game: game::GameState,
    pub admin: admin::AdminState,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Borrow the app state mutably for the duration of `f`. Callers must not
/// nest; every event handler takes one borrow, snapshots what it needs, and
/// touches the DOM after.
pub fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let backing = LocalStorage::open()
        .ok_or_else(|| JsValue::from_str("local storage unavailable"))?;
    let store = PaperStore::new(backing, POOL_STORAGE_KEY, HISTORY_STORAGE_KEY);
    APP.with(|cell| {
        cell.replace(Some(App {
            store,
            game: game::GameState::default(),
            admin: admin::AdminState::default(),
        }))
    });

    inject_base_styles(&doc)?;
    ensure_background(&doc)?;
    render_route(&doc)?;

    // Hash navigation: links use href="#/..." so a single listener suffices.
    {
        let closure = Closure::wrap(Box::new(move || {
            if let Some(doc) = window().and_then(|w| w.document()) {
                render_route(&doc).ok();
            }
        }) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

// --- Routing -----------------------------------------------------------------

enum Route {
    Game,
    Admin,
}

fn current_route() -> Route {
    let hash = window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    match hash.as_str() {
        "#/admin" => Route::Admin,
        _ => Route::Game,
    }
}

/// Clear the page root and render the page the hash points at.
pub fn render_route(doc: &Document) -> Result<(), JsValue> {
    let root = ensure_root(doc)?;
    root.set_inner_html("");
    // Overlays hang off `body`, outside the root, so clear them by hand.
    for id in ["mb-modal", "mb-edit-modal", "mb-confetti"] {
        if let Some(stale) = doc.get_element_by_id(id) {
            stale.remove();
        }
    }
    match current_route() {
        Route::Game => {
            // Leaving the panel drops its session, so the passcode is asked
            // again next visit.
            with_app(|app| app.admin = admin::AdminState::default());
            game::render(doc, &root)
        }
        Route::Admin => admin::render(doc, &root),
    }
}

/// Re-render the current route from scratch; used by handlers after state
/// changes that reshape the page.
pub fn rerender() {
    if let Some(doc) = window().and_then(|w| w.document()) {
        render_route(&doc).ok();
    }
}

fn ensure_root(doc: &Document) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id("mb-root") {
        return Ok(el);
    }
    let root = doc.create_element("div")?;
    root.set_id("mb-root");
    root.set_attribute("style", "position:relative; z-index:10; min-height:100vh;")?;
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&root)?;
    Ok(root)
}

// --- DOM helpers -------------------------------------------------------------

/// Create an element with an inline style attribute.
pub fn el(doc: &Document, tag: &str, style: &str) -> Result<Element, JsValue> {
    let e = doc.create_element(tag)?;
    if !style.is_empty() {
        e.set_attribute("style", style)?;
    }
    Ok(e)
}

// --- Base styles & background ------------------------------------------------

const BASE_CSS: &str = "\
html, body { margin:0; padding:0; min-height:100vh; background:#0F0518; color:#e9e4f0; \
  font-family:'Segoe UI', 'Noto Sans Arabic', sans-serif; overflow-x:hidden; }\
a { text-decoration:none; color:inherit; }\
button { font-family:inherit; }\
@keyframes mb-shake { 0%,100% { transform:translateX(0); } 25% { transform:translateX(-6px); } 75% { transform:translateX(6px); } }\
@keyframes mb-modal-in { from { opacity:0; transform:translateY(50px) scale(0.8); } to { opacity:1; transform:translateY(0) scale(1); } }\
@keyframes mb-fade-in { from { opacity:0; } to { opacity:1; } }\
@keyframes mb-pulse { 0%,100% { opacity:0.5; } 50% { opacity:1; } }\
@keyframes mb-drift-a { 0%,100% { transform:translate(0,0) scale(1); } 50% { transform:translate(50px,30px) scale(1.1); } }\
@keyframes mb-drift-b { 0%,100% { transform:translate(0,0) scale(1); } 50% { transform:translate(-40px,-40px) scale(1.2); } }\
@keyframes mb-float { 0%,100% { transform:translateY(0) rotate(0deg); opacity:0.1; } 50% { transform:translateY(-30px) rotate(45deg); opacity:0.3; } }\
.mb-scroll::-webkit-scrollbar { width:6px; }\
.mb-scroll::-webkit-scrollbar-track { background:rgba(255,255,255,0.05); border-radius:10px; }\
.mb-scroll::-webkit-scrollbar-thumb { background:rgba(255,255,255,0.2); border-radius:10px; }\
";

fn inject_base_styles(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("mb-style").is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id("mb-style");
    style.set_text_content(Some(BASE_CSS));
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&style)?;
    Ok(())
}

/// Fixed backdrop: two drifting blurred gradient orbs plus a sprinkling of
/// floating glyphs. Rendered once and left alone across route changes.
fn ensure_background(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("mb-bg").is_some() {
        return Ok(());
    }
    let bg = el(
        doc,
        "div",
        "position:fixed; inset:0; pointer-events:none; z-index:0; overflow:hidden; background:#0F0518;",
    )?;
    bg.set_id("mb-bg");

    let mut html = String::from(
        "<div style='position:absolute; top:-10%; left:-10%; width:50vw; height:50vw; \
         background:#D946EF; border-radius:50%; filter:blur(100px); opacity:0.2; \
         animation:mb-drift-a 10s ease-in-out infinite;'></div>\
         <div style='position:absolute; bottom:10%; right:-5%; width:40vw; height:40vw; \
         background:#8B5CF6; border-radius:50%; filter:blur(100px); opacity:0.2; \
         animation:mb-drift-b 12s ease-in-out infinite;'></div>",
    );

    let glyphs = ["✨", "🌸", "💮"];
    let mut rng = Lcg::new(paper::now_millis());
    for i in 0..8 {
        let glyph = glyphs[i % glyphs.len()];
        let color = if i % 2 == 0 { "#D946EF" } else { "#06B6D4" };
        let left = rng.next_f64() * 90.0;
        let top = rng.next_f64() * 90.0;
        let size = 30.0 + rng.next_f64() * 40.0;
        let dur = 8.0 + rng.next_f64() * 8.0;
        let delay = rng.next_f64() * 5.0;
        html.push_str(&format!(
            "<div style='position:absolute; left:{left:.1}%; top:{top:.1}%; font-size:{size:.0}px; \
             opacity:0.2; filter:drop-shadow(0 0 10px {color}); \
             animation:mb-float {dur:.1}s ease-in-out {delay:.1}s infinite;'>{glyph}</div>"
        ));
    }
    bg.set_inner_html(&html);

    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&bg)?;
    Ok(())
}
