use log::debug;
use zoomy_protocol::{Targeted, Timespan, WidgetCommand, WidgetHandle};

use crate::model::Options;
use crate::widget::{Widget, WidgetError};

/// All widgets of a page, addressed by handle, plus their sync groups.
///
/// Every non-silent update of a widget in a sync group is replayed silently
/// on the other members, so zooming or dragging one graph moves all of them.
#[derive(Debug, Default)]
pub struct WidgetSet {
    widgets: Vec<Option<Widget>>,
    groups: Vec<Vec<WidgetHandle>>,
}

impl WidgetSet {
    pub const fn new() -> Self {
        Self {
            widgets: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Register a widget for an image showing `src`.
    pub fn init(
        &mut self,
        src: impl Into<String>,
        options: Options,
    ) -> Result<WidgetHandle, WidgetError> {
        let widget = Widget::new(src, options)?;
        let handle = WidgetHandle(self.widgets.len());
        debug!("registered widget {handle} for {}", widget.src());
        self.widgets.push(Some(widget));
        Ok(handle)
    }

    /// Unregister a widget and drop it from every sync group.
    pub fn destroy(&mut self, handle: WidgetHandle) -> Result<Widget, WidgetError> {
        let widget = self
            .widgets
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(WidgetError::UnknownHandle(handle))?;
        for group in &mut self.groups {
            group.retain(|&member| member != handle);
        }
        self.groups.retain(|group| group.len() > 1);
        Ok(widget)
    }

    pub fn get(&self, handle: WidgetHandle) -> Result<&Widget, WidgetError> {
        self.widgets
            .get(handle.0)
            .and_then(Option::as_ref)
            .ok_or(WidgetError::UnknownHandle(handle))
    }

    pub fn get_mut(&mut self, handle: WidgetHandle) -> Result<&mut Widget, WidgetError> {
        self.widgets
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(WidgetError::UnknownHandle(handle))
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.widgets.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Link `handles` so that updates on any of them propagate to the rest.
    pub fn sync(&mut self, handles: &[WidgetHandle]) -> Result<(), WidgetError> {
        for &handle in handles {
            self.get(handle)?;
        }
        let mut group = handles.to_vec();
        group.sort_unstable();
        group.dedup();
        if group.len() > 1 {
            debug!("syncing widgets {group:?}");
            self.groups.push(group);
        }
        Ok(())
    }

    /// Handles sharing at least one sync group with `handle`.
    pub fn synced_with(&self, handle: WidgetHandle) -> Vec<WidgetHandle> {
        let mut others: Vec<WidgetHandle> = self
            .groups
            .iter()
            .filter(|group| group.contains(&handle))
            .flatten()
            .copied()
            .filter(|&member| member != handle)
            .collect();
        others.sort_unstable();
        others.dedup();
        others
    }

    pub fn on_load(
        &mut self,
        handle: WidgetHandle,
        now: i64,
        width: f64,
    ) -> Result<Timespan, WidgetError> {
        self.get_mut(handle)?.on_load(now, width)
    }

    pub fn resize(&mut self, handle: WidgetHandle, width: f64) -> Result<(), WidgetError> {
        self.get_mut(handle)?.resize(width);
        Ok(())
    }

    pub fn on_error(&mut self, handle: WidgetHandle) -> Result<Vec<Targeted>, WidgetError> {
        let commands = self.get_mut(handle)?.on_error();
        Ok(self.dispatch(handle, commands))
    }

    pub fn on_wheel(
        &mut self,
        handle: WidgetHandle,
        now_ms: f64,
        x: f64,
        delta: i32,
    ) -> Result<Vec<Targeted>, WidgetError> {
        let commands = self.get_mut(handle)?.on_wheel(now_ms, x, delta);
        Ok(self.dispatch(handle, commands))
    }

    pub fn flush_wheel(
        &mut self,
        handle: WidgetHandle,
        now_ms: f64,
    ) -> Result<Vec<Targeted>, WidgetError> {
        let commands = self.get_mut(handle)?.flush_wheel(now_ms);
        Ok(self.dispatch(handle, commands))
    }

    pub fn on_mouse_down(&mut self, handle: WidgetHandle, x: f64) -> Result<(), WidgetError> {
        self.get_mut(handle)?.on_mouse_down(x);
        Ok(())
    }

    pub fn on_mouse_up(
        &mut self,
        handle: WidgetHandle,
        x: f64,
    ) -> Result<Vec<Targeted>, WidgetError> {
        let commands = self.get_mut(handle)?.on_mouse_up(x);
        Ok(self.dispatch(handle, commands))
    }

    /// Explicitly move a widget to `[start, end]`.
    pub fn update(
        &mut self,
        handle: WidgetHandle,
        start: i64,
        end: i64,
    ) -> Result<Vec<Targeted>, WidgetError> {
        let span =
            Timespan::new(start, end).ok_or(WidgetError::InvalidTimespan { start, end })?;
        let commands = self.get_mut(handle)?.update(span, false);
        Ok(self.dispatch(handle, commands))
    }

    /// Address `commands` to `handle`, appending the silent updates of its
    /// synced peers after each `AfterUpdate`.
    fn dispatch(&mut self, handle: WidgetHandle, commands: Vec<WidgetCommand>) -> Vec<Targeted> {
        let mut out = Vec::with_capacity(commands.len());
        for command in commands {
            let span = match &command {
                WidgetCommand::AfterUpdate { span } => Some(*span),
                _ => None,
            };
            out.push(Targeted::new(handle, command));
            let Some(span) = span else { continue };
            for peer in self.synced_with(handle) {
                if let Ok(widget) = self.get_mut(peer) {
                    out.extend(
                        widget
                            .update(span, true)
                            .into_iter()
                            .map(|command| Targeted::new(peer, command)),
                    );
                }
            }
        }
        out
    }
}
