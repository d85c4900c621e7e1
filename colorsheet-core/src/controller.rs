//! The synchronization core of a picker session.
//!
//! ## Usage
//!
//! Create one [`ColorPickerController`] per picker session, register a
//! change callback, and route every UI input (slider drag, hex commit,
//! space switch) through its operations. Each operation recomputes the
//! derived [`DisplaySnapshot`] and delivers exactly one notification,
//! tagged with whether the UI should animate the update: continuous drags
//! are not animated, discrete commits are.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use derive_setters::Setters;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    codec::{self, ComponentValues, ContrastColors},
    color::Color,
    hex::{self, HexParseError},
    space::{ColorSpace, ComponentKey},
    state::ColorState,
};

/// All user-visible derived values, recomputed after each change.
///
/// Snapshots are ephemeral: the UI renders them and throws them away; they
/// are never fed back into the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    /// The space the components below belong to.
    pub space: ColorSpace,
    /// Display-scaled component values in presentation order.
    pub components: ComponentValues,
    /// Uppercase hex without `#`: 6 digits opaque, 8 with alpha.
    pub hex: String,
    /// The color to fill the preview swatch with.
    pub preview: Color,
    /// A text color readable against `preview`.
    pub text_color: Color,
}

impl DisplaySnapshot {
    /// The display value of one component, if the space has it.
    pub fn component(&self, key: ComponentKey) -> Option<f32> {
        self.components
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    /// Text for the large overlay label, e.g. `"Red 255"` or `"Hue 210°"`.
    pub fn primary_text(&self) -> String {
        let spec = self.space.primary();
        let value = self.component(spec.key).unwrap_or(spec.display_min);
        format!("{} {}", spec.key.label(), spec.format(value))
    }
}

/// Stable, comparable handle for a change-notification closure.
///
/// Compares by identity (`Arc::ptr_eq`) so it can sit in component props
/// without forcing deep closure comparisons. The closure receives the new
/// snapshot and whether the UI should animate the update.
#[derive(Clone)]
pub struct ChangeCallback {
    inner: Arc<dyn Fn(&DisplaySnapshot, bool) + Send + Sync>,
}

impl ChangeCallback {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&DisplaySnapshot, bool) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(handler),
        }
    }

    /// Invoke the callback.
    pub fn call(&self, snapshot: &DisplaySnapshot, animated: bool) {
        (self.inner)(snapshot, animated);
    }
}

impl<F> From<F> for ChangeCallback
where
    F: Fn(&DisplaySnapshot, bool) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl PartialEq for ChangeCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ChangeCallback {}

/// A mutation the controller refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickerError {
    /// A component of a space other than the active one was edited.
    #[error("cannot edit a {edited} component while {active} is active")]
    InactiveSpace {
        /// The space the edited component belongs to.
        edited: ColorSpace,
        /// The space that is currently active.
        active: ColorSpace,
    },
    /// The component key does not belong to the given space.
    #[error("{space} has no {key} component")]
    UnknownComponent {
        /// The space that was edited.
        space: ColorSpace,
        /// The key the space does not have.
        key: ComponentKey,
    },
}

/// Configuration for [`ColorPickerController::new`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct PickerConfig {
    /// The color the picker starts on.
    pub initial_color: Color,
    /// The space whose sliders are shown first.
    pub initial_space: ColorSpace,
    /// Overlay text colors used for the contrast decision.
    pub text_colors: ContrastColors,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial_color: Color::WHITE,
            initial_space: ColorSpace::Rgb,
            text_colors: ContrastColors::default(),
        }
    }
}

/// Orchestrates mutations from any input source over one [`ColorState`].
///
/// Methods take `&self` so the controller can be shared (`Arc`) with UI
/// closures; the state sits behind a mutex for that reason, not for
/// cross-thread contention. A separate atomic flag guards against
/// re-entrancy: recomputing a snapshot drives UI writes that may themselves
/// emit change events, and a mutator invoked from inside another mutator's
/// notification is ignored (with a warning) so each user gesture produces
/// exactly one notification.
pub struct ColorPickerController {
    state: Mutex<ColorState>,
    text_colors: ContrastColors,
    updating: AtomicBool,
    on_change: Mutex<Option<ChangeCallback>>,
}

/// Clears the updating flag when an operation ends, error paths included.
struct UpdateGuard<'a>(&'a AtomicBool);

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ColorPickerController {
    /// Creates a controller for one picker session.
    ///
    /// No notification fires for the initial state; callers that need one
    /// can read [`ColorPickerController::snapshot`] directly.
    pub fn new(config: PickerConfig) -> Self {
        Self {
            state: Mutex::new(ColorState::new(config.initial_color, config.initial_space)),
            text_colors: config.text_colors,
            updating: AtomicBool::new(false),
            on_change: Mutex::new(None),
        }
    }

    /// Registers the observer, replacing any previous one.
    pub fn set_on_change(&self, callback: impl Into<ChangeCallback>) {
        *self.on_change.lock() = Some(callback.into());
    }

    /// Removes the observer.
    pub fn clear_on_change(&self) {
        *self.on_change.lock() = None;
    }

    /// The current derived representations.
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.snapshot_of(&self.state.lock())
    }

    /// The canonical color.
    pub fn color(&self) -> Color {
        self.state.lock().color()
    }

    /// The space whose sliders are currently shown.
    pub fn active_space(&self) -> ColorSpace {
        self.state.lock().active_space()
    }

    /// Applies a slider edit: one component of the active space changes to
    /// `raw_value` (display scale, clamped to the component's range).
    ///
    /// The returned snapshot carries the caller's clamped value in the
    /// edited slot rather than a re-derived rounded echo, so a slider is
    /// not fought mid-drag. Notifies with `animated = false`.
    pub fn set_component(
        &self,
        space: ColorSpace,
        key: ComponentKey,
        raw_value: f32,
    ) -> Result<DisplaySnapshot, PickerError> {
        let Some(_guard) = self.try_begin_update("set_component") else {
            return Ok(self.snapshot());
        };

        let mut state = self.state.lock();
        let active = state.active_space();
        if space != active {
            return Err(PickerError::InactiveSpace {
                edited: space,
                active,
            });
        }
        let Some(spec) = space.component(key) else {
            return Err(PickerError::UnknownComponent { space, key });
        };

        let clamped = spec.clamp(raw_value);
        let mut values = codec::components_from_color(space, state.color(), state.hue());
        for entry in values.iter_mut() {
            if entry.0 == key {
                entry.1 = clamped;
            }
        }
        let next = codec::color_from_components(space, &values, state.color().a());
        state.set_color(next);
        if key == ComponentKey::Hue {
            state.set_hue(clamped);
        }
        debug!(%space, %key, value = clamped, "component edited");

        let mut snapshot = self.snapshot_of(&state);
        drop(state);
        for entry in snapshot.components.iter_mut() {
            if entry.0 == key {
                entry.1 = clamped;
            }
        }
        self.notify(&snapshot, false);
        Ok(snapshot)
    }

    /// Applies a committed hex string.
    ///
    /// On success the canonical color is replaced and the notification is
    /// animated (a discrete commit snaps visually). On failure nothing
    /// changes and no notification fires; the UI decides how to reject.
    pub fn commit_hex(&self, input: &str) -> Result<DisplaySnapshot, HexParseError> {
        let Some(_guard) = self.try_begin_update("commit_hex") else {
            return Ok(self.snapshot());
        };

        let color = hex::parse_commit(input).inspect_err(|error| {
            warn!(input, %error, "rejected hex commit");
        })?;

        let mut state = self.state.lock();
        state.set_color(color);
        debug!(input, "hex committed");
        let snapshot = self.snapshot_of(&state);
        drop(state);
        self.notify(&snapshot, true);
        Ok(snapshot)
    }

    /// Switches the active space.
    ///
    /// Idempotent: switching to the already-active space returns the
    /// current snapshot without notifying. A real switch recomputes all
    /// components in the new space's scaling and notifies animated.
    pub fn set_active_space(&self, space: ColorSpace) -> DisplaySnapshot {
        let Some(_guard) = self.try_begin_update("set_active_space") else {
            return self.snapshot();
        };

        let mut state = self.state.lock();
        if state.active_space() == space {
            return self.snapshot_of(&state);
        }
        state.set_active_space(space);
        debug!(%space, "active space switched");
        let snapshot = self.snapshot_of(&state);
        drop(state);
        self.notify(&snapshot, true);
        snapshot
    }

    /// Replaces the canonical color from outside, notifying animated.
    pub fn set_color(&self, color: Color) -> DisplaySnapshot {
        self.set_color_animated(color, true)
    }

    /// Replaces the canonical color with an explicit animation hint.
    pub fn set_color_animated(&self, color: Color, animated: bool) -> DisplaySnapshot {
        let Some(_guard) = self.try_begin_update("set_color") else {
            return self.snapshot();
        };

        let mut state = self.state.lock();
        state.set_color(color);
        let snapshot = self.snapshot_of(&state);
        drop(state);
        self.notify(&snapshot, animated);
        snapshot
    }

    fn try_begin_update(&self, operation: &str) -> Option<UpdateGuard<'_>> {
        if self.updating.swap(true, Ordering::Acquire) {
            warn!(operation, "ignoring re-entrant call during update");
            return None;
        }
        Some(UpdateGuard(&self.updating))
    }

    fn snapshot_of(&self, state: &ColorState) -> DisplaySnapshot {
        let space = state.active_space();
        let color = state.color();
        DisplaySnapshot {
            space,
            components: codec::components_from_color(space, color, state.hue()),
            hex: codec::to_hex(color),
            preview: color,
            text_color: codec::contrasting_text_color(color, &self.text_colors),
        }
    }

    fn notify(&self, snapshot: &DisplaySnapshot, animated: bool) {
        let callback = self.on_change.lock().clone();
        if let Some(callback) = callback {
            callback.call(snapshot, animated);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn controller_with(initial: Color, space: ColorSpace) -> ColorPickerController {
        ColorPickerController::new(
            PickerConfig::default()
                .initial_color(initial)
                .initial_space(space),
        )
    }

    #[test]
    fn test_initial_red_snapshot() {
        let controller = controller_with(Color::RED, ColorSpace::Rgb);
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.component(ComponentKey::Red), Some(255.0));
        assert_eq!(snapshot.component(ComponentKey::Green), Some(0.0));
        assert_eq!(snapshot.component(ComponentKey::Blue), Some(0.0));
        assert_eq!(snapshot.hex, "FF0000");
        assert_eq!(snapshot.preview, Color::RED);
        // L(red) = 0.299 < 0.5, so the overlay text is the light color.
        assert_eq!(
            snapshot.text_color,
            ContrastColors::default().light
        );
        assert_eq!(snapshot.primary_text(), "Red 255");
    }

    #[test]
    fn test_set_component_clamps() {
        let controller = controller_with(Color::BLACK, ColorSpace::Rgb);

        let snapshot = controller
            .set_component(ColorSpace::Rgb, ComponentKey::Red, 999.0)
            .expect("active space edit");
        assert_eq!(snapshot.component(ComponentKey::Red), Some(255.0));
        assert_eq!(controller.color().r(), 1.0);

        let snapshot = controller
            .set_component(ColorSpace::Rgb, ComponentKey::Red, -50.0)
            .expect("active space edit");
        assert_eq!(snapshot.component(ComponentKey::Red), Some(0.0));
        assert_eq!(controller.color().r(), 0.0);
    }

    #[test]
    fn test_set_component_keeps_raw_value_in_edited_slot() {
        let controller = controller_with(Color::BLACK, ColorSpace::Rgb);
        let snapshot = controller
            .set_component(ColorSpace::Rgb, ComponentKey::Red, 127.3)
            .expect("active space edit");
        // The edited slot echoes the clamped input, not the rounded 127.
        assert_eq!(snapshot.component(ComponentKey::Red), Some(127.3));
    }

    #[test]
    fn test_set_component_rejects_inactive_space() {
        let controller = controller_with(Color::RED, ColorSpace::Rgb);
        let before = controller.snapshot();

        let result = controller.set_component(ColorSpace::Hsb, ComponentKey::Hue, 120.0);
        assert_eq!(
            result,
            Err(PickerError::InactiveSpace {
                edited: ColorSpace::Hsb,
                active: ColorSpace::Rgb,
            })
        );
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_set_component_rejects_foreign_key() {
        let controller = controller_with(Color::RED, ColorSpace::Rgb);
        let result = controller.set_component(ColorSpace::Rgb, ComponentKey::Hue, 120.0);
        assert_eq!(
            result,
            Err(PickerError::UnknownComponent {
                space: ColorSpace::Rgb,
                key: ComponentKey::Hue,
            })
        );
    }

    #[test]
    fn test_commit_hex_shorthand() {
        let controller = controller_with(Color::WHITE, ColorSpace::Rgb);
        let animations = Arc::new(Mutex::new(Vec::new()));
        let seen = animations.clone();
        controller.set_on_change(ChangeCallback::new(move |_, animated| {
            seen.lock().push(animated);
        }));

        let snapshot = controller.commit_hex("0F0").expect("valid hex");
        assert_eq!(snapshot.preview, Color::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(snapshot.hex, "00FF00");
        assert_eq!(*animations.lock(), vec![true]);
    }

    #[test]
    fn test_commit_hex_failure_leaves_state_untouched() {
        let controller = controller_with(Color::RED, ColorSpace::Rgb);
        let notified = Arc::new(AtomicUsize::new(0));
        let count = notified.clone();
        controller.set_on_change(ChangeCallback::new(move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
        }));
        let before = controller.snapshot();

        assert_eq!(controller.commit_hex("12"), Err(HexParseError::TooShort));
        assert_eq!(controller.snapshot(), before);
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_set_active_space_is_idempotent() {
        let controller = controller_with(Color::RED, ColorSpace::Rgb);
        let notified = Arc::new(AtomicUsize::new(0));
        let count = notified.clone();
        controller.set_on_change(ChangeCallback::new(move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
        }));

        let first = controller.set_active_space(ColorSpace::Hsb);
        assert_eq!(first.space, ColorSpace::Hsb);
        assert_eq!(first.component(ComponentKey::Hue), Some(0.0));
        assert_eq!(notified.load(Ordering::SeqCst), 1);

        let second = controller.set_active_space(ColorSpace::Hsb);
        assert_eq!(second, first);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hue_survives_zero_saturation_excursion() {
        let controller = controller_with(Color::RED, ColorSpace::Rgb);

        let snapshot = controller.set_active_space(ColorSpace::Hsb);
        assert_eq!(snapshot.component(ComponentKey::Hue), Some(0.0));

        // Pick a chromatic hue first, then drain the saturation.
        controller
            .set_component(ColorSpace::Hsb, ComponentKey::Hue, 210.0)
            .expect("hue edit");
        let snapshot = controller
            .set_component(ColorSpace::Hsb, ComponentKey::Saturation, 0.0)
            .expect("saturation edit");
        assert_eq!(snapshot.component(ComponentKey::Hue), Some(210.0));

        controller.set_active_space(ColorSpace::Rgb);
        let snapshot = controller.set_active_space(ColorSpace::Hsb);
        assert_eq!(snapshot.component(ComponentKey::Hue), Some(210.0));
        assert_eq!(snapshot.component(ComponentKey::Saturation), Some(0.0));
    }

    #[test]
    fn test_reentrant_mutation_is_ignored() {
        let controller = Arc::new(controller_with(Color::BLACK, ColorSpace::Rgb));
        let notified = Arc::new(AtomicUsize::new(0));

        let nested = controller.clone();
        let count = notified.clone();
        controller.set_on_change(ChangeCallback::new(move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
            // Simulates a UI observer writing back during the update.
            nested.set_color(Color::WHITE);
        }));

        let snapshot = controller
            .set_component(ColorSpace::Rgb, ComponentKey::Red, 128.0)
            .expect("active space edit");

        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.component(ComponentKey::Red), Some(128.0));
        // The nested set_color was dropped, not applied after the fact.
        assert_eq!(controller.color().to_rgba_u8(), [128, 0, 0, 255]);
    }

    #[test]
    fn test_callback_replacement() {
        let controller = controller_with(Color::BLACK, ColorSpace::Rgb);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let count = first.clone();
        controller.set_on_change(ChangeCallback::new(move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
        }));
        controller.set_color(Color::RED);

        let count = second.clone();
        controller.set_on_change(ChangeCallback::new(move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
        }));
        controller.set_color(Color::BLUE);

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transparent_preview_uses_fallback_text() {
        let controller = ColorPickerController::new(
            PickerConfig::default()
                .initial_color(Color::new(0.9, 0.2, 0.4, 0.2))
                .text_colors(ContrastColors {
                    fallback: Color::BLUE,
                    ..ContrastColors::default()
                }),
        );
        assert_eq!(controller.snapshot().text_color, Color::BLUE);
    }

    #[test]
    fn test_cmyk_snapshot_after_switch() {
        let controller = controller_with(Color::RED, ColorSpace::Rgb);
        let snapshot = controller.set_active_space(ColorSpace::Cmyk);
        assert_eq!(snapshot.component(ComponentKey::Cyan), Some(0.0));
        assert_eq!(snapshot.component(ComponentKey::Magenta), Some(100.0));
        assert_eq!(snapshot.component(ComponentKey::Yellow), Some(100.0));
        assert_eq!(snapshot.component(ComponentKey::Black), Some(0.0));
        assert_eq!(snapshot.primary_text(), "Cyan 0%");
    }
}
