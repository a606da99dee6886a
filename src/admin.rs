//! Admin panel: manage the prize pool and inspect the draw history.
//!
//! Entry is gated behind a hardcoded passcode. That gate is pure UI (anyone
//! with dev tools can read or edit local storage directly); it only keeps the
//! box's player out of the prize list by accident.
//!
//! The panel is rebuilt from the store after every mutation, so what is on
//! screen always reflects what a reload would show.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement, window};

use crate::ADMIN_PASSCODE;
use crate::app::{el, rerender, with_app};
use crate::group::PaperGroup;
use crate::paper::Paper;

// --- Page state --------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Active,
    History,
}

/// Delete buttons arm on first click and fire on the second; the armed state
/// falls back after two seconds.
pub struct ArmedDelete {
    pub content: String,
    pub armed_at: f64,
}

#[derive(Default)]
pub struct AdminState {
    pub authed: bool,
    pub tab: AdminTab,
    shake_login: bool,
    confirming_delete: Option<ArmedDelete>,
    /// Content of the group currently open in the edit modal.
    editing: Option<String>,
}

const DELETE_ARM_MS: f64 = 2000.0;

const GLASS: &str = "background:rgba(255,255,255,0.04); border:1px solid rgba(255,255,255,0.1); \
    border-radius:32px; padding:32px; backdrop-filter:blur(12px);";

// --- Rendering ---------------------------------------------------------------

pub fn render(doc: &Document, root: &Element) -> Result<(), JsValue> {
    let authed = with_app(|app| {
        let shake = app.admin.shake_login;
        app.admin.shake_login = false;
        (app.admin.authed, shake)
    });
    match authed {
        Some((true, _)) => render_panel(doc, root),
        Some((false, shake)) => render_login(doc, root, shake),
        None => Ok(()),
    }
}

// --- Login gate --------------------------------------------------------------

fn render_login(doc: &Document, root: &Element, shake: bool) -> Result<(), JsValue> {
    let wrap = el(
        doc,
        "div",
        "min-height:100vh; display:flex; align-items:center; justify-content:center; padding:16px;",
    )?;
    let panel = el(
        doc,
        "div",
        &format!(
            "{GLASS} width:100%; max-width:360px; border-radius:40px; text-align:center; {}",
            if shake {
                "animation:mb-shake 0.5s ease-in-out;"
            } else {
                ""
            }
        ),
    )?;
    panel.set_inner_html(
        "<div style='font-size:36px; margin-bottom:24px;'>🔒</div>\
         <h2 style='margin:0 0 32px 0; font-size:28px; color:white;'>منطقة سرية</h2>",
    );

    let input = el(
        doc,
        "input",
        "width:100%; box-sizing:border-box; padding:16px; border-radius:16px; \
         border:1px solid rgba(255,255,255,0.1); background:rgba(0,0,0,0.2); color:white; \
         text-align:center; font-size:20px; letter-spacing:6px; outline:none;",
    )?;
    input.set_id("mb-pass");
    input.set_attribute("type", "password")?;
    input.set_attribute("placeholder", "••••")?;
    panel.append_child(&input)?;

    let button = el(
        doc,
        "button",
        "width:100%; margin-top:24px; padding:16px; border:none; border-radius:16px; \
         background:linear-gradient(90deg,#D946EF,#8B5CF6); color:white; font-weight:bold; \
         font-size:16px; cursor:pointer; box-shadow:0 0 15px rgba(217,70,239,0.5);",
    )?;
    button.set_text_content(Some("دخول"));
    panel.append_child(&button)?;

    let back = el(
        doc,
        "a",
        "display:inline-block; margin-top:32px; font-size:13px; color:rgba(255,255,255,0.4); cursor:pointer;",
    )?;
    back.set_attribute("href", "#/")?;
    back.set_text_content(Some("عودة"));
    panel.append_child(&back)?;

    wrap.append_child(&panel)?;
    root.append_child(&wrap)?;

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            attempt_login();
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Enter" {
                attempt_login();
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn attempt_login() {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let entered = doc
        .get_element_by_id("mb-pass")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|i| i.value())
        .unwrap_or_default();
    with_app(|app| {
        if entered == ADMIN_PASSCODE {
            app.admin.authed = true;
        } else {
            app.admin.shake_login = true;
        }
    });
    rerender();
}

// --- Panel -------------------------------------------------------------------

struct PanelSnapshot {
    tab: AdminTab,
    groups: Vec<PaperGroup>,
    total: usize,
    history: Vec<Paper>,
    confirming: Option<String>,
    editing: Option<String>,
}

fn render_panel(doc: &Document, root: &Element) -> Result<(), JsValue> {
    let Some(snap) = with_app(|app| PanelSnapshot {
        tab: app.admin.tab,
        groups: app.store.grouped_active(),
        total: app.store.list_active().len(),
        history: app.store.list_history(),
        confirming: app.admin.confirming_delete.as_ref().map(|a| a.content.clone()),
        editing: app.admin.editing.clone(),
    }) else {
        return Ok(());
    };

    let page = el(
        doc,
        "div",
        "min-height:100vh; padding:32px 16px; max-width:960px; margin:0 auto;",
    )?;

    // Header: exit left, title right.
    let header = el(
        doc,
        "div",
        "display:flex; align-items:center; justify-content:space-between; margin-bottom:40px; gap:24px;",
    )?;
    let exit = el(
        doc,
        "a",
        "padding:10px 20px; border:1px solid rgba(255,255,255,0.1); border-radius:999px; \
         background:rgba(255,255,255,0.05); color:rgba(255,255,255,0.7); font-size:14px;",
    )?;
    exit.set_attribute("href", "#/")?;
    exit.set_text_content(Some("← الخروج"));
    let title = el(
        doc,
        "h1",
        "margin:0; font-size:32px; background:linear-gradient(90deg,#f0abfc,#c4b5fd); \
         -webkit-background-clip:text; background-clip:text; color:transparent;",
    )?;
    title.set_text_content(Some("لوحة التحكم"));
    header.append_child(&exit)?;
    header.append_child(&title)?;
    page.append_child(&header)?;

    page.append_child(&tabs_row(doc, snap.tab)?.into())?;

    match snap.tab {
        AdminTab::Active => {
            let grid = el(
                doc,
                "div",
                "display:flex; flex-wrap:wrap; gap:32px; align-items:flex-start;",
            )?;
            grid.append_child(&add_card(doc)?.into())?;
            grid.append_child(&pool_card(doc, &snap)?.into())?;
            page.append_child(&grid)?;
        }
        AdminTab::History => {
            page.append_child(&history_card(doc, &snap.history)?.into())?;
        }
    }

    root.append_child(&page)?;

    if let Some(original) = &snap.editing {
        let count = snap
            .groups
            .iter()
            .find(|g| &g.content == original)
            .map(|g| g.count)
            .unwrap_or(1);
        open_edit_modal(doc, original, count)?;
    }
    Ok(())
}

fn tabs_row(doc: &Document, current: AdminTab) -> Result<Element, JsValue> {
    let row = el(
        doc,
        "div",
        "display:flex; justify-content:center; margin-bottom:32px; gap:4px; padding:4px; \
         width:fit-content; margin-left:auto; margin-right:auto; border-radius:999px; \
         background:rgba(255,255,255,0.05); border:1px solid rgba(255,255,255,0.1);",
    )?;
    for (tab, label, active_bg) in [
        (AdminTab::Active, "🎁 الورق المتاح", "#D946EF"),
        (AdminTab::History, "🕘 الأرشيف", "#8B5CF6"),
    ] {
        let style = if tab == current {
            format!(
                "padding:12px 32px; border:none; border-radius:999px; cursor:pointer; \
                 font-weight:bold; color:white; background:{active_bg}; \
                 box-shadow:0 0 15px {active_bg}80;"
            )
        } else {
            "padding:12px 32px; border:none; border-radius:999px; cursor:pointer; \
             font-weight:bold; color:rgba(255,255,255,0.6); background:transparent;"
                .to_string()
        };
        let btn = el(doc, "button", &style)?;
        btn.set_text_content(Some(label));
        {
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
                with_app(|app| app.admin.tab = tab);
                rerender();
            }) as Box<dyn FnMut(_)>);
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        row.append_child(&btn)?;
    }
    Ok(row)
}

// --- Active tab: add form ----------------------------------------------------

fn add_card(doc: &Document) -> Result<Element, JsValue> {
    let card = el(doc, "section", &format!("{GLASS} flex:1 1 300px;"))?;
    let heading = el(doc, "h2", "margin:0 0 24px 0; font-size:22px; color:white;")?;
    heading.set_text_content(Some("➕ إضافة جديد"));
    card.append_child(&heading)?;

    let textarea = el(
        doc,
        "textarea",
        "width:100%; box-sizing:border-box; height:160px; padding:16px; border-radius:16px; \
         border:1px solid rgba(255,255,255,0.1); background:rgba(0,0,0,0.2); color:white; \
         resize:none; outline:none; font-family:inherit; font-size:15px;",
    )?;
    textarea.set_id("mb-add-content");
    textarea.set_attribute("placeholder", "اكتبي هنا...")?;
    card.append_child(&textarea)?;

    let qty_row = el(
        doc,
        "div",
        "display:flex; align-items:center; gap:12px; margin-top:16px; padding:12px; \
         border-radius:12px; background:rgba(0,0,0,0.2); border:1px solid rgba(255,255,255,0.05);",
    )?;
    let qty_label = el(
        doc,
        "label",
        "font-size:13px; font-weight:bold; color:rgba(255,255,255,0.7); white-space:nowrap;",
    )?;
    qty_label.set_text_content(Some("العدد:"));
    let range = el(doc, "input", "flex:1; accent-color:#06B6D4;")?;
    range.set_id("mb-add-qty");
    range.set_attribute("type", "range")?;
    range.set_attribute("min", "1")?;
    range.set_attribute("max", "50")?;
    range.set_attribute("value", "1")?;
    let qty_value = el(
        doc,
        "span",
        "width:32px; text-align:center; font-family:monospace; font-weight:bold; color:white;",
    )?;
    qty_value.set_id("mb-add-qty-val");
    qty_value.set_text_content(Some("1"));
    qty_row.append_child(&qty_label)?;
    qty_row.append_child(&range)?;
    qty_row.append_child(&qty_value)?;
    card.append_child(&qty_row)?;

    let submit = el(
        doc,
        "button",
        "width:100%; margin-top:20px; padding:16px; border:none; border-radius:12px; \
         background:linear-gradient(90deg,#06B6D4,#3B82F6); color:white; font-weight:bold; \
         font-size:16px; cursor:pointer; box-shadow:0 0 15px rgba(6,182,212,0.5);",
    )?;
    submit.set_text_content(Some("إضافة ⚡"));
    card.append_child(&submit)?;

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(doc) = window().and_then(|w| w.document()) {
                let value = doc
                    .get_element_by_id("mb-add-qty")
                    .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
                    .map(|i| i.value())
                    .unwrap_or_default();
                if let Some(span) = doc.get_element_by_id("mb-add-qty-val") {
                    span.set_text_content(Some(&value));
                }
            }
        }) as Box<dyn FnMut(_)>);
        range.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            on_add();
        }) as Box<dyn FnMut(_)>);
        submit.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(card)
}

fn on_add() {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let content = doc
        .get_element_by_id("mb-add-content")
        .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|t| t.value())
        .unwrap_or_default();
    if content.trim().is_empty() {
        return;
    }
    let quantity = doc
        .get_element_by_id("mb-add-qty")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .and_then(|i| i.value().parse::<usize>().ok())
        .unwrap_or(1);
    // One paper per unit of quantity; count in the pool is draw probability.
    with_app(|app| {
        for _ in 0..quantity {
            app.store.add(&content);
        }
    });
    rerender();
}

// --- Active tab: grouped pool list -------------------------------------------

fn pool_card(doc: &Document, snap: &PanelSnapshot) -> Result<Element, JsValue> {
    let card = el(doc, "section", &format!("{GLASS} flex:1.5 1 380px;"))?;
    let head = el(
        doc,
        "div",
        "display:flex; justify-content:space-between; align-items:center; margin-bottom:24px; \
         padding-bottom:16px; border-bottom:1px solid rgba(255,255,255,0.1);",
    )?;
    let heading = el(doc, "h2", "margin:0; font-size:19px; color:white;")?;
    heading.set_text_content(Some("المحتوى الحالي"));
    let total = el(doc, "span", "font-size:14px; color:rgba(255,255,255,0.6);")?;
    total.set_text_content(Some(&format!("الإجمالي: {}", snap.total)));
    head.append_child(&heading)?;
    head.append_child(&total)?;
    card.append_child(&head)?;

    let list = el(
        doc,
        "div",
        "display:flex; flex-direction:column; gap:12px; max-height:60vh; overflow-y:auto; \
         padding-left:8px;",
    )?;
    list.set_class_name("mb-scroll");
    if snap.groups.is_empty() {
        let empty = el(
            doc,
            "div",
            "text-align:center; padding:48px 0; color:rgba(255,255,255,0.3); font-style:italic;",
        )?;
        empty.set_inner_html("<div style='font-size:44px; opacity:0.3;'>🎁</div><div>الصندوق فارغ</div>");
        list.append_child(&empty)?;
    } else {
        for group in &snap.groups {
            list.append_child(&group_row(doc, group, snap.confirming.as_deref())?.into())?;
        }
    }
    card.append_child(&list)?;
    Ok(card)
}

fn group_row(
    doc: &Document,
    group: &PaperGroup,
    confirming: Option<&str>,
) -> Result<Element, JsValue> {
    let row = el(
        doc,
        "div",
        "display:flex; align-items:center; gap:16px; padding:16px; border-radius:16px; \
         background:rgba(255,255,255,0.05); border:1px solid rgba(255,255,255,0.05);",
    )?;

    let text = el(
        doc,
        "p",
        "flex:1; margin:0; color:rgba(255,255,255,0.9); line-height:1.6; overflow-wrap:anywhere;",
    )?;
    text.set_text_content(Some(&group.content));
    row.append_child(&text)?;

    let badge = el(
        doc,
        "span",
        "min-width:48px; text-align:center; padding:4px 12px; border-radius:8px; \
         font-family:monospace; font-weight:bold; font-size:13px; color:#D946EF; \
         background:rgba(217,70,239,0.15); border:1px solid rgba(217,70,239,0.2);",
    )?;
    badge.set_text_content(Some(&format!("x{}", group.count)));
    row.append_child(&badge)?;

    // Edit: opens the modal prefilled with this group.
    let edit = el(
        doc,
        "button",
        "padding:8px 10px; border:none; border-radius:50%; background:transparent; \
         color:rgba(255,255,255,0.4); font-size:15px; cursor:pointer;",
    )?;
    edit.set_text_content(Some("✏️"));
    edit.set_attribute("title", "تعديل")?;
    {
        let content = group.content.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_app(|app| app.admin.editing = Some(content.clone()));
            rerender();
        }) as Box<dyn FnMut(_)>);
        edit.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    row.append_child(&edit)?;

    // Delete: two-click confirm, armed state drawn red.
    let armed = confirming == Some(group.content.as_str());
    let delete_style = if armed {
        "padding:8px 10px; border:none; border-radius:50%; background:#ef4444; color:white; \
         font-size:15px; cursor:pointer; transform:scale(1.1); box-shadow:0 4px 12px rgba(239,68,68,0.5);"
    } else {
        "padding:8px 10px; border:none; border-radius:50%; background:transparent; \
         color:rgba(255,255,255,0.4); font-size:15px; cursor:pointer;"
    };
    let delete = el(doc, "button", delete_style)?;
    delete.set_text_content(Some("🗑️"));
    delete.set_attribute("title", if armed { "اضغط مرة أخرى للتأكيد" } else { "حذف" })?;
    {
        let content = group.content.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            on_delete(&content);
        }) as Box<dyn FnMut(_)>);
        delete.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    row.append_child(&delete)?;

    Ok(row)
}

fn on_delete(content: &str) {
    let now = perf_now();
    let fired = with_app(|app| {
        let armed = app
            .admin
            .confirming_delete
            .as_ref()
            .is_some_and(|a| a.content == content);
        if armed {
            app.store.delete_group(content);
            app.admin.confirming_delete = None;
            true
        } else {
            app.admin.confirming_delete = Some(ArmedDelete {
                content: content.to_string(),
                armed_at: now,
            });
            false
        }
    })
    .unwrap_or(false);

    if !fired {
        schedule_disarm(content.to_string(), now);
    }
    rerender();
}

/// After the arming window passes, snap the delete button back to idle if the
/// same arming is still pending.
fn schedule_disarm(content: String, armed_at: f64) {
    let Some(win) = window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        let cleared = with_app(|app| {
            let stale = app
                .admin
                .confirming_delete
                .as_ref()
                .is_some_and(|a| a.content == content && a.armed_at == armed_at);
            if stale {
                app.admin.confirming_delete = None;
            }
            stale
        })
        .unwrap_or(false);
        if cleared {
            rerender();
        }
    }) as Box<dyn FnMut()>);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        DELETE_ARM_MS as i32,
    )
    .ok();
    closure.forget();
}

// --- Edit modal --------------------------------------------------------------

fn open_edit_modal(doc: &Document, original: &str, count: usize) -> Result<(), JsValue> {
    let overlay = el(
        doc,
        "div",
        "position:fixed; inset:0; z-index:50; display:flex; align-items:center; \
         justify-content:center; padding:16px; background:rgba(0,0,0,0.7); \
         backdrop-filter:blur(6px); animation:mb-fade-in 0.15s ease;",
    )?;
    overlay.set_id("mb-edit-modal");

    let panel = el(
        doc,
        "div",
        &format!("{GLASS} width:100%; max-width:420px; animation:mb-modal-in 0.2s ease;"),
    )?;

    let head = el(
        doc,
        "div",
        "display:flex; justify-content:space-between; align-items:center; margin-bottom:20px;",
    )?;
    let heading = el(doc, "h3", "margin:0; font-size:20px; color:white;")?;
    heading.set_text_content(Some("تعديل الورقة"));
    let close = el(
        doc,
        "button",
        "border:none; background:transparent; color:rgba(255,255,255,0.5); font-size:20px; cursor:pointer;",
    )?;
    close.set_text_content(Some("✕"));
    head.append_child(&heading)?;
    head.append_child(&close)?;
    panel.append_child(&head)?;

    let content_label = el(
        doc,
        "label",
        "display:block; font-size:13px; color:rgba(255,255,255,0.6); margin-bottom:6px;",
    )?;
    content_label.set_text_content(Some("المحتوى"));
    panel.append_child(&content_label)?;
    let textarea = el(
        doc,
        "textarea",
        "width:100%; box-sizing:border-box; height:120px; padding:14px; border-radius:12px; \
         border:1px solid rgba(255,255,255,0.1); background:rgba(0,0,0,0.3); color:white; \
         resize:none; outline:none; font-family:inherit; font-size:15px;",
    )?;
    textarea.set_id("mb-edit-content");
    panel.append_child(&textarea)?;
    if let Some(t) = textarea.dyn_ref::<HtmlTextAreaElement>() {
        t.set_value(original);
    }

    let count_label = el(
        doc,
        "label",
        "display:block; font-size:13px; color:rgba(255,255,255,0.6); margin:16px 0 6px 0;",
    )?;
    count_label.set_text_content(Some("العدد في الصندوق"));
    panel.append_child(&count_label)?;
    let count_input = el(
        doc,
        "input",
        "width:100%; box-sizing:border-box; padding:12px; border-radius:12px; \
         border:1px solid rgba(255,255,255,0.1); background:rgba(0,0,0,0.3); color:white; \
         font-family:monospace; font-weight:bold; text-align:center; outline:none;",
    )?;
    count_input.set_id("mb-edit-count");
    count_input.set_attribute("type", "number")?;
    count_input.set_attribute("min", "0")?;
    count_input.set_attribute("max", "50")?;
    if let Some(i) = count_input.dyn_ref::<HtmlInputElement>() {
        i.set_value(&count.to_string());
    }
    panel.append_child(&count_input)?;

    let save = el(
        doc,
        "button",
        "width:100%; margin-top:24px; padding:14px; border:none; border-radius:12px; \
         background:#06B6D4; color:black; font-weight:bold; font-size:15px; cursor:pointer; \
         box-shadow:0 0 15px rgba(6,182,212,0.5);",
    )?;
    save.set_text_content(Some("💾 حفظ التغييرات"));
    panel.append_child(&save)?;

    overlay.append_child(&panel)?;
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&overlay)?;

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_app(|app| app.admin.editing = None);
            rerender_without_modal();
        }) as Box<dyn FnMut(_)>);
        close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let original = original.to_string();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            on_save_edit(&original);
        }) as Box<dyn FnMut(_)>);
        save.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn on_save_edit(original: &str) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let new_content = doc
        .get_element_by_id("mb-edit-content")
        .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|t| t.value())
        .unwrap_or_default();
    if new_content.trim().is_empty() {
        return;
    }
    // Unparseable count means no save, same as an empty content field.
    let Some(new_count) = doc
        .get_element_by_id("mb-edit-count")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .and_then(|i| i.value().parse::<usize>().ok())
    else {
        return;
    };
    with_app(|app| {
        app.store.replace_group(original, &new_content, new_count);
        app.admin.editing = None;
    });
    rerender_without_modal();
}

/// The edit modal hangs off `body`, not the page root, so drop it explicitly
/// before re-rendering.
fn rerender_without_modal() {
    if let Some(doc) = window().and_then(|w| w.document())
        && let Some(modal) = doc.get_element_by_id("mb-edit-modal")
    {
        modal.remove();
    }
    rerender();
}

// --- History tab -------------------------------------------------------------

fn history_card(doc: &Document, history: &[Paper]) -> Result<Element, JsValue> {
    let card = el(doc, "section", GLASS)?;
    let head = el(
        doc,
        "div",
        "display:flex; justify-content:space-between; align-items:center; margin-bottom:24px;",
    )?;
    let heading = el(doc, "h2", "margin:0; font-size:19px; color:white;")?;
    heading.set_text_content(Some("سجل الفتح"));
    let controls = el(doc, "div", "display:flex; align-items:center; gap:12px;")?;
    let badge = el(
        doc,
        "span",
        "padding:4px 16px; border-radius:999px; font-family:monospace; font-size:13px; \
         color:white; background:rgba(255,255,255,0.1); border:1px solid rgba(255,255,255,0.1);",
    )?;
    badge.set_text_content(Some(&history.len().to_string()));
    controls.append_child(&badge)?;

    if !history.is_empty() {
        let clear = el(
            doc,
            "button",
            "display:flex; align-items:center; gap:6px; padding:8px 16px; border-radius:999px; \
             font-size:12px; cursor:pointer; color:#f87171; background:rgba(239,68,68,0.1); \
             border:1px solid rgba(239,68,68,0.2);",
        )?;
        clear.set_text_content(Some("🔄 مسح"));
        {
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
                on_clear_history();
            }) as Box<dyn FnMut(_)>);
            clear.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        controls.append_child(&clear)?;
    }
    head.append_child(&heading)?;
    head.append_child(&controls)?;
    card.append_child(&head)?;

    let list = el(
        doc,
        "div",
        "display:flex; flex-direction:column; gap:12px; max-height:70vh; overflow-y:auto; \
         padding-left:8px;",
    )?;
    list.set_class_name("mb-scroll");
    if history.is_empty() {
        let empty = el(
            doc,
            "div",
            "text-align:center; padding:48px 0; color:rgba(255,255,255,0.3); font-style:italic;",
        )?;
        empty.set_inner_html("<div style='font-size:44px; opacity:0.3;'>🕘</div><div>لا يوجد سجل</div>");
        list.append_child(&empty)?;
    } else {
        // Newest draws first.
        for paper in history.iter().rev() {
            let row = el(
                doc,
                "div",
                "display:flex; align-items:center; justify-content:space-between; gap:12px; \
                 padding:16px; border-radius:16px; background:rgba(255,255,255,0.05); \
                 border:1px solid rgba(255,255,255,0.05); color:rgba(255,255,255,0.6);",
            )?;
            let text = el(doc, "p", "margin:0; overflow-wrap:anywhere;")?;
            text.set_text_content(Some(&paper.content));
            row.append_child(&text)?;
            if let Some(opened_at) = paper.opened_at {
                let stamp = el(
                    doc,
                    "span",
                    "font-family:monospace; font-size:12px; padding:4px 8px; border-radius:6px; \
                     background:rgba(0,0,0,0.2); white-space:nowrap;",
                )?;
                stamp.set_text_content(Some(&format_opened_at(opened_at)));
                row.append_child(&stamp)?;
            }
            list.append_child(&row)?;
        }
    }
    card.append_child(&list)?;
    Ok(card)
}

fn on_clear_history() {
    let confirmed = window()
        .and_then(|w| w.confirm_with_message("مسح السجل بالكامل؟").ok())
        .unwrap_or(false);
    if !confirmed {
        return;
    }
    with_app(|app| app.store.clear_history());
    rerender();
}

/// Local wall-clock time of a draw, hour and minute.
fn format_opened_at(epoch_ms: u64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(epoch_ms as f64));
    format!("{:02}:{:02}", date.get_hours(), date.get_minutes())
}

fn perf_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
