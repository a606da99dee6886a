//! Tiny synthesized sound effects via Web Audio. Failures are swallowed:
//! browsers may refuse an `AudioContext` before a user gesture, and the game
//! must keep working silently.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

/// Soft pop on each box tap: a short sine blip sliding 600 → 300 Hz.
pub fn play_pop() {
    let _ = try_pop();
}

fn try_pop() -> Result<(), JsValue> {
    let ctx = AudioContext::new()?;
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let now = ctx.current_time();
    osc.set_type(OscillatorType::Sine);
    osc.frequency().set_value_at_time(600.0, now)?;
    osc.frequency()
        .exponential_ramp_to_value_at_time(300.0, now + 0.1)?;
    gain.gain().set_value_at_time(0.2, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, now + 0.1)?;
    osc.start()?;
    osc.stop_with_when(now + 0.1)?;
    Ok(())
}

/// Winning reveal chime: a rising five-note triangle arpeggio (C5 E5 G5 C6 E6).
pub fn play_win() {
    let _ = try_win();
}

fn try_win() -> Result<(), JsValue> {
    let ctx = AudioContext::new()?;
    let notes = [523.25f32, 659.25, 783.99, 1046.50, 1318.51];
    for (i, note) in notes.iter().enumerate() {
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        osc.set_type(OscillatorType::Triangle);
        osc.frequency().set_value(*note);
        let start = ctx.current_time() + i as f64 * 0.1;
        gain.gain().set_value_at_time(0.0, start)?;
        gain.gain().linear_ramp_to_value_at_time(0.15, start + 0.05)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, start + 0.5)?;
        osc.start_with_when(start)?;
        osc.stop_with_when(start + 0.5)?;
    }
    Ok(())
}
