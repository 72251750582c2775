// SPDX: CC0-1.0

use crate::{
    color::{self, Rgb},
    eval::FunctionModel,
    parse::{parse, ParseErr},
    GraphSpec,
};
use core::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Graphed,
    Hidden,
    Invalid,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graphed => write!(f, "graphed"),
            Self::Hidden => write!(f, "hidden"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

/// One equation as typed by the user, with the outcome of parsing it.
#[derive(Clone, Debug)]
pub struct Entry {
    text: Arc<String>,
    outcome: Result<FunctionModel, ParseErr>,
    pub color: Rgb,
    graphed: bool,
}

impl Entry {
    pub fn new(text: impl Into<String>) -> Self {
        let text = Arc::new(text.into());
        let outcome = parse(&text);
        Self {
            text,
            outcome,
            color: color::DEFAULT_CURVE,
            graphed: true,
        }
    }

    pub fn text(&self) -> &Arc<String> {
        &self.text
    }

    pub fn outcome(&self) -> &Result<FunctionModel, ParseErr> {
        &self.outcome
    }

    pub fn status(&self) -> Status {
        match (&self.outcome, self.graphed) {
            (Err(_), _) => Status::Invalid,
            (Ok(_), true) => Status::Graphed,
            (Ok(_), false) => Status::Hidden,
        }
    }

    /// Replace the text, parsing it from scratch. The graphed flag survives.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let Self { color, graphed, .. } = *self;
        *self = Self {
            color,
            graphed,
            ..Self::new(text)
        };
    }

    /// Flip between graphed and hidden. Invalid equations don't toggle.
    pub fn toggle(&mut self) -> bool {
        if self.outcome.is_err() {
            return false;
        }
        self.graphed = !self.graphed;
        true
    }

    pub fn spec(&self) -> Option<GraphSpec> {
        self.outcome.as_ref().ok().map(|model| GraphSpec {
            model: model.clone(),
            color: self.color,
            visible: self.graphed,
        })
    }
}

/// The ordered list of equations being plotted.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    entries: Vec<Entry>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> Option<&Entry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an equation, returning its index.
    pub fn add(&mut self, text: impl Into<String>) -> usize {
        let entry = Entry::new(text);
        log::info!("added equation '{}' ({})", entry.text, entry.status());
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn edit(&mut self, idx: usize, text: impl Into<String>) -> Option<&Entry> {
        let entry = self.entries.get_mut(idx)?;
        entry.set_text(text);
        log::info!("equation {idx} is now '{}' ({})", entry.text, entry.status());
        Some(entry)
    }

    pub fn remove(&mut self, idx: usize) -> Option<Entry> {
        (idx < self.entries.len()).then(|| {
            let entry = self.entries.remove(idx);
            log::info!("removed equation '{}'", entry.text);
            entry
        })
    }

    /// `None` if there is no such equation, otherwise whether it toggled.
    pub fn toggle(&mut self, idx: usize) -> Option<bool> {
        let entry = self.entries.get_mut(idx)?;
        let toggled = entry.toggle();
        log::info!("equation {idx} is {}", entry.status());
        Some(toggled)
    }

    pub fn set_color(&mut self, idx: usize, color: Rgb) -> Option<()> {
        self.entries.get_mut(idx)?.color = color;
        Some(())
    }

    /// Drawable state of every valid equation, in order. Invalid equations
    /// are left out without affecting the rest.
    pub fn specs(&self) -> Vec<GraphSpec> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let spec = entry.spec();
                if spec.is_none() {
                    log::warn!("skipping invalid equation '{}'", entry.text);
                }
                spec
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let mut sheet = Sheet::new();
        let a = sheet.add("y=x");
        let b = sheet.add("y=");
        assert_eq!(sheet.get(a).unwrap().status(), Status::Graphed);
        assert_eq!(sheet.get(b).unwrap().status(), Status::Invalid);

        assert_eq!(sheet.toggle(a), Some(true));
        assert_eq!(sheet.get(a).unwrap().status(), Status::Hidden);
        assert_eq!(sheet.toggle(b), Some(false));
        assert_eq!(sheet.get(b).unwrap().status(), Status::Invalid);
        assert_eq!(sheet.toggle(7), None);
    }

    #[test]
    fn invalid_entries_do_not_disturb_others() {
        let mut sheet = Sheet::new();
        sheet.add("y=x");
        sheet.add("nonsense");
        sheet.add("x=cos(t);y=sin(t);0<t<2pi");
        let specs = sheet.specs();
        assert_eq!(specs.len(), 2);
        assert!(specs.iter().all(|spec| spec.visible));
    }

    #[test]
    fn hidden_entries_stay_in_specs_but_invisible() {
        let mut sheet = Sheet::new();
        let idx = sheet.add("y=x");
        sheet.toggle(idx);
        let specs = sheet.specs();
        assert_eq!(specs.len(), 1);
        assert!(!specs[0].visible);
    }

    #[test]
    fn edit_reparses_and_keeps_color() {
        let mut sheet = Sheet::new();
        let idx = sheet.add("y=x");
        sheet.set_color(idx, Rgb::new(1, 2, 3)).unwrap();
        let entry = sheet.edit(idx, "y=2x^").unwrap();
        assert_eq!(entry.status(), Status::Invalid);
        assert_eq!(entry.color, Rgb::new(1, 2, 3));

        let entry = sheet.edit(idx, "y=2x^2").unwrap();
        assert_eq!(entry.status(), Status::Graphed);
        assert_eq!(entry.text().as_str(), "y=2x^2");
        assert!(sheet.edit(5, "y=1").is_none());
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut sheet = Sheet::new();
        sheet.add("y=1");
        sheet.add("y=2");
        sheet.add("y=3");
        assert_eq!(sheet.remove(1).unwrap().text().as_str(), "y=2");
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.get(1).unwrap().text().as_str(), "y=3");
        assert!(sheet.remove(2).is_none());
    }

    #[test]
    fn default_color() {
        let mut sheet = Sheet::new();
        let idx = sheet.add("y=1");
        assert_eq!(sheet.specs()[0].color, color::DEFAULT_CURVE);
        assert!(sheet.set_color(idx + 1, Rgb::WHITE).is_none());
    }
}
