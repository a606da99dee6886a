//! Game page: the mystery box itself.
//!
//! The player taps the gift box; each tap pops, shakes the box and advances
//! a progress bar. On the fifth tap the page asks the store for one random
//! paper and reveals it in a modal — confetti and a chime on success, a fixed
//! "box is empty" message when the pool is exhausted. Closing the modal
//! resets the tap counter.
//!
//! Visuals follow one pattern: DOM overlays addressed by `mb-*` ids, inline
//! styles, `Closure` listeners, and a single `requestAnimationFrame` loop
//! that drives the box shake, the confetti canvas and the delayed modal open.

pub mod audio;
pub mod confetti;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, window};

use crate::CLICKS_NEEDED;
use crate::app::{el, with_app};

// --- Page state --------------------------------------------------------------

pub struct PendingReveal {
    content: String,
    is_error: bool,
    open_at_ms: f64,
}

pub struct GameState {
    pub clicks: u32,
    pub modal_open: bool,
    pub muted: bool,
    shake_start_ms: f64,
    pending: Option<PendingReveal>,
    particles: Vec<confetti::Particle>,
    raf_active: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            clicks: 0,
            modal_open: false,
            muted: false,
            shake_start_ms: -1.0e9,
            pending: None,
            particles: Vec::new(),
            raf_active: false,
        }
    }
}

// --- Copy --------------------------------------------------------------------

const TITLE: &str = "بوكس السعادة";
const SUBTITLE: &str = "Mystery Box Edition";
/// Fixed pool-exhausted message; a `None` draw is an outcome, not a failure.
const EXHAUSTED_MESSAGE: &str = "الصندوق خلص يا قمر! 🥺 ارجعي للأدمن يزود مفاجآت.";
const WIN_TITLE: &str = "مبروك!";
const ERROR_TITLE: &str = "أوبس!";
const WIN_BUTTON: &str = "استمري! ✨";
const ERROR_BUTTON: &str = "حسنًا";

const BOX_STYLE: &str = "font-size:180px; line-height:1; cursor:pointer; user-select:none; \
    filter:drop-shadow(0 25px 25px rgba(0,0,0,0.45));";

// --- Rendering ---------------------------------------------------------------

pub fn render(doc: &Document, root: &Element) -> Result<(), JsValue> {
    // Fresh page state; only the animation-loop flag survives so the already
    // scheduled loop keeps driving the rebuilt DOM instead of doubling up.
    with_app(|app| {
        let raf_active = app.game.raf_active;
        app.game = GameState::default();
        app.game.raf_active = raf_active;
    });

    let page = el(
        doc,
        "div",
        "display:flex; flex-direction:column; align-items:center; justify-content:center; \
         min-height:100vh; padding:16px; position:relative;",
    )?;

    // Top controls: admin link left, mute toggle right.
    let bar = el(
        doc,
        "div",
        "position:absolute; top:24px; left:24px; right:24px; display:flex; \
         justify-content:space-between; align-items:center; z-index:20;",
    )?;
    let settings = el(
        doc,
        "a",
        "padding:12px; background:rgba(255,255,255,0.06); border:1px solid rgba(255,255,255,0.1); \
         border-radius:50%; font-size:22px; cursor:pointer;",
    )?;
    settings.set_attribute("href", "#/admin")?;
    settings.set_text_content(Some("⚙️"));
    let mute = el(
        doc,
        "button",
        "padding:12px; background:rgba(255,255,255,0.06); border:1px solid rgba(255,255,255,0.1); \
         border-radius:50%; font-size:22px; cursor:pointer; color:inherit;",
    )?;
    mute.set_id("mb-mute");
    mute.set_text_content(Some("🔊"));
    bar.append_child(&settings)?;
    bar.append_child(&mute)?;
    page.append_child(&bar)?;

    // Title block.
    let title_wrap = el(doc, "div", "text-align:center; margin-bottom:48px;")?;
    let title = el(
        doc,
        "h1",
        "font-size:56px; margin:0 0 12px 0; font-weight:bold; letter-spacing:1px; \
         background:linear-gradient(90deg,#f0abfc,#c4b5fd,#a5b4fc); -webkit-background-clip:text; \
         background-clip:text; color:transparent; text-shadow:0 4px 24px rgba(217,70,239,0.35);",
    )?;
    title.set_text_content(Some(TITLE));
    let subtitle = el(
        doc,
        "p",
        "margin:0; color:#9b8fb5; font-size:18px; letter-spacing:3px; font-weight:300;",
    )?;
    subtitle.set_text_content(Some(SUBTITLE));
    title_wrap.append_child(&title)?;
    title_wrap.append_child(&subtitle)?;
    page.append_child(&title_wrap)?;

    // The box.
    let gift = el(doc, "div", BOX_STYLE)?;
    gift.set_id("mb-box");
    gift.set_text_content(Some("🎁"));
    page.append_child(&gift)?;

    // Progress bar + labels.
    let progress_wrap = el(doc, "div", "width:288px; margin-top:56px;")?;
    let track = el(
        doc,
        "div",
        "height:12px; background:rgba(255,255,255,0.1); border-radius:999px; overflow:hidden;",
    )?;
    let fill = el(
        doc,
        "div",
        "height:100%; width:0%; border-radius:999px; transition:width 0.3s ease; \
         background:linear-gradient(90deg,#D946EF,#8B5CF6,#06B6D4); \
         box-shadow:0 0 15px rgba(217,70,239,0.8);",
    )?;
    fill.set_id("mb-progress-fill");
    track.append_child(&fill)?;
    let labels = el(
        doc,
        "div",
        "display:flex; justify-content:space-between; margin-top:8px; font-size:11px; \
         color:#9b8fb5; letter-spacing:1px;",
    )?;
    labels.set_inner_html(
        "<span>START</span><span style='color:#06B6D4; letter-spacing:3px;'>UNLOCKING</span><span>OPEN</span>",
    );
    progress_wrap.append_child(&track)?;
    progress_wrap.append_child(&labels)?;
    page.append_child(&progress_wrap)?;

    let caption = el(
        doc,
        "p",
        "margin-top:32px; font-size:13px; color:rgba(255,255,255,0.5); letter-spacing:4px; \
         font-weight:300; animation:mb-pulse 2s ease-in-out infinite;",
    )?;
    caption.set_id("mb-caption");
    caption.set_text_content(Some("TAP TO UNLOCK"));
    page.append_child(&caption)?;

    root.append_child(&page)?;

    ensure_confetti_canvas(doc)?;

    // Tap listener.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            on_box_click();
        }) as Box<dyn FnMut(_)>);
        gift.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Mute toggle.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let muted = with_app(|app| {
                app.game.muted = !app.game.muted;
                app.game.muted
            })
            .unwrap_or(false);
            if let Some(doc) = window().and_then(|w| w.document())
                && let Some(btn) = doc.get_element_by_id("mb-mute")
            {
                btn.set_text_content(Some(if muted { "🔇" } else { "🔊" }));
            }
        }) as Box<dyn FnMut(_)>);
        mute.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    ensure_loop();
    Ok(())
}

/// Full-viewport canvas the confetti renders onto; above the page, below the
/// modal, transparent to clicks.
fn ensure_confetti_canvas(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("mb-confetti").is_some() {
        return Ok(());
    }
    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_id("mb-confetti");
    canvas.set_attribute(
        "style",
        "position:fixed; inset:0; pointer-events:none; z-index:40;",
    )?;
    if let Some(win) = window() {
        let w = win.inner_width()?.as_f64().unwrap_or(1280.0);
        let h = win.inner_height()?.as_f64().unwrap_or(720.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&canvas)?;
    Ok(())
}

// --- Interaction -------------------------------------------------------------

fn on_box_click() {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let canvas_dims = doc
        .get_element_by_id("mb-confetti")
        .and_then(|c| c.dyn_into::<HtmlCanvasElement>().ok())
        .map(|c| (c.width() as f64, c.height() as f64))
        .unwrap_or((1280.0, 720.0));
    let now = perf_now();

    let tapped = with_app(|app| {
        if app.game.modal_open || app.game.pending.is_some() {
            return None;
        }
        app.game.shake_start_ms = now;
        app.game.clicks += 1;

        let mut won = None;
        if app.game.clicks >= CLICKS_NEEDED {
            let (content, is_error) = match app.store.draw_random() {
                Some(content) => (content, false),
                None => (EXHAUSTED_MESSAGE.to_string(), true),
            };
            if !is_error {
                confetti::spawn_burst(
                    &mut app.game.particles,
                    canvas_dims.0,
                    canvas_dims.1,
                    now,
                );
            }
            // Let the shake play out before the reveal, like a held breath.
            app.game.pending = Some(PendingReveal {
                content,
                is_error,
                open_at_ms: now + 300.0,
            });
            won = Some(!is_error);
        }
        Some((app.game.muted, app.game.clicks, won))
    })
    .flatten();

    let Some((muted, clicks, won)) = tapped else {
        return;
    };
    if !muted {
        audio::play_pop();
        if won == Some(true) {
            audio::play_win();
        }
    }
    update_progress(&doc, clicks);
}

fn update_progress(doc: &Document, clicks: u32) {
    let pct = ((clicks as f64 / CLICKS_NEEDED as f64) * 100.0).min(100.0);
    if let Some(fill) = doc.get_element_by_id("mb-progress-fill") {
        fill.set_attribute(
            "style",
            &format!(
                "height:100%; width:{pct:.0}%; border-radius:999px; transition:width 0.3s ease; \
                 background:linear-gradient(90deg,#D946EF,#8B5CF6,#06B6D4); \
                 box-shadow:0 0 15px rgba(217,70,239,0.8);"
            ),
        )
        .ok();
    }
    if let Some(caption) = doc.get_element_by_id("mb-caption") {
        let text = if clicks == 0 {
            "TAP TO UNLOCK"
        } else if clicks >= CLICKS_NEEDED {
            "UNLOCKED!"
        } else {
            "KEEP TAPPING..."
        };
        caption.set_text_content(Some(text));
    }
}

// --- Animation loop ----------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn ensure_loop() {
    let fresh = with_app(|app| {
        if app.game.raf_active {
            false
        } else {
            app.game.raf_active = true;
            true
        }
    })
    .unwrap_or(false);
    if !fresh {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if game_tick(ts) {
            if let Some(w) = window() {
                let _ = w
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// One frame: box shake, confetti, delayed modal open. Returns false (ending
/// the loop) once the game page has been navigated away from.
fn game_tick(now: f64) -> bool {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return false;
    };
    let Some(gift) = doc.get_element_by_id("mb-box") else {
        // Page unmounted; drop leftover effects and stop.
        with_app(|app| {
            app.game.raf_active = false;
            app.game.particles.clear();
        });
        return false;
    };
    let canvas = doc
        .get_element_by_id("mb-confetti")
        .and_then(|c| c.dyn_into::<HtmlCanvasElement>().ok());

    let frame = with_app(|app| {
        // Tap shake: short decaying wobble around the rest pose.
        let age = now - app.game.shake_start_ms;
        let transform = if (0.0..150.0).contains(&age) {
            let t = age / 150.0;
            let wobble = (t * 4.0 * std::f64::consts::PI).sin();
            let tx = wobble * 8.0 * (1.0 - t);
            let rot = wobble * 4.0 * (1.0 - t);
            let scale = 1.0 + 0.05 * (t * std::f64::consts::PI).sin();
            format!("transform:translateX({tx:.1}px) rotate({rot:.1}deg) scale({scale:.3});")
        } else {
            String::new()
        };

        if let Some(canvas) = &canvas
            && let Ok(Some(ctx)) = canvas.get_context("2d")
            && let Ok(ctx) = ctx.dyn_into::<web_sys::CanvasRenderingContext2d>()
        {
            confetti::step_and_render(
                &ctx,
                canvas.width() as f64,
                canvas.height() as f64,
                &mut app.game.particles,
                now,
            );
        }

        let reveal_due = app
            .game
            .pending
            .as_ref()
            .is_some_and(|p| now >= p.open_at_ms);
        let due = if reveal_due {
            app.game.modal_open = true;
            app.game.pending.take()
        } else {
            None
        };
        (transform, due)
    });

    let Some((transform, due)) = frame else {
        return false;
    };
    gift.set_attribute("style", &format!("{BOX_STYLE} {transform}")).ok();
    if let Some(reveal) = due {
        open_modal(&doc, &reveal).ok();
    }
    true
}

// --- Result modal ------------------------------------------------------------

fn open_modal(doc: &Document, reveal: &PendingReveal) -> Result<(), JsValue> {
    let overlay = el(
        doc,
        "div",
        "position:fixed; inset:0; display:flex; align-items:center; justify-content:center; \
         z-index:50; padding:16px;",
    )?;
    overlay.set_id("mb-modal");

    let backdrop = el(
        doc,
        "div",
        "position:absolute; inset:0; background:rgba(0,0,0,0.6); backdrop-filter:blur(10px); \
         animation:mb-fade-in 0.2s ease;",
    )?;
    backdrop.set_id("mb-modal-backdrop");

    let panel = el(
        doc,
        "div",
        "position:relative; width:100%; max-width:420px; padding:32px; text-align:center; \
         background:rgba(26,11,46,0.85); border:1px solid rgba(255,255,255,0.15); \
         border-radius:40px; box-shadow:0 0 40px rgba(217,70,239,0.25); \
         animation:mb-modal-in 0.25s ease;",
    )?;
    let (title, button_label, accent) = if reveal.is_error {
        (ERROR_TITLE, ERROR_BUTTON, "#8B5CF6")
    } else {
        (WIN_TITLE, WIN_BUTTON, "#D946EF")
    };
    panel.set_inner_html(&format!(
        "<div style='font-size:44px; margin-bottom:16px;'>✨</div>\
         <h2 style='margin:0 0 16px 0; font-size:30px; background:linear-gradient(90deg,#f9a8d4,#c4b5fd,#a5b4fc); \
         -webkit-background-clip:text; background-clip:text; color:transparent;'>{title}</h2>\
         <p id='mb-modal-text' style='font-size:20px; line-height:1.7; color:#f3f0fa; margin:0;'></p>\
         <button id='mb-modal-btn' style='margin-top:32px; width:100%; padding:16px; border:1px solid rgba(255,255,255,0.2); \
         border-radius:16px; background:linear-gradient(90deg,{accent},#8B5CF6); color:white; \
         font-weight:bold; font-size:16px; cursor:pointer;'>{button_label}</button>"
    ));

    overlay.append_child(&backdrop)?;
    overlay.append_child(&panel)?;
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&overlay)?;

    // Paper content is user-authored; set as text, never as markup.
    if let Some(text) = doc.get_element_by_id("mb-modal-text") {
        text.set_text_content(Some(&reveal.content));
    }

    for id in ["mb-modal-backdrop", "mb-modal-btn"] {
        if let Some(target) = doc.get_element_by_id(id) {
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
                close_modal();
            }) as Box<dyn FnMut(_)>);
            target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
    }
    Ok(())
}

/// Dismiss the reveal and rearm the box for another round of taps.
fn close_modal() {
    with_app(|app| {
        app.game.clicks = 0;
        app.game.modal_open = false;
    });
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(modal) = doc.get_element_by_id("mb-modal") {
            modal.remove();
        }
        update_progress(&doc, 0);
    }
}

fn perf_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
