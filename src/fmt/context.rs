//! Print/parse contexts, the temporal accessor boundary, and the parsed binding set.

use alloc::string::String;
use alloc::vec::Vec;

use super::field::Field;

/// Capability a concrete temporal value must expose to be printed.
///
/// This is the narrow seam between the formatting engine and whatever calendar
/// types a caller actually has lying around -- [`Date`](crate::Date), [`Time`](crate::Time),
/// [`DateTime`](crate::DateTime), or something else entirely.
pub trait TemporalAccessor {
    /// Returns `true` if `field` can be read from this value.
    fn is_supported(&self, field: Field) -> bool;

    /// Returns the raw value of `field`.
    ///
    /// # Panics
    ///
    /// May panic if `field` is not supported; callers must check [`Self::is_supported`] first.
    fn get(&self, field: Field) -> i64;

    /// Returns the UTC offset in effect, if any. Used by [`Offset`](super::node::Node::Offset)
    /// and [`ZoneId`](super::node::Node::ZoneId) nodes.
    fn offset_seconds(&self) -> Option<i32> {
        None
    }
}

/// Carries the temporal being printed, together with the output buffer.
pub struct PrintContext<'a> {
    accessor: &'a dyn TemporalAccessor,
    pub(super) buffer: String,
}

impl<'a> PrintContext<'a> {
    pub(super) fn new(accessor: &'a dyn TemporalAccessor) -> Self {
        Self {
            accessor,
            buffer: String::new(),
        }
    }

    pub(super) fn is_supported(&self, field: Field) -> bool {
        self.accessor.is_supported(field)
    }

    pub(super) fn get(&self, field: Field) -> i64 {
        self.accessor.get(field)
    }

    pub(super) fn offset_seconds(&self) -> Option<i32> {
        self.accessor.offset_seconds()
    }
}

/// A single `(field, value)` binding produced while parsing.
type Binding = (Field, i64);

/// The output of a successful parse: field bindings plus the zone-id and excess-days
/// side channels described in §3/§4.4 of the design.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    bindings: Vec<Binding>,
    zone_id: Option<String>,
    excess_days: Option<i32>,
    leap_second_seen: bool,
}

impl BindingSet {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Records `field = value`. If the field was already bound to a *different*
    /// value this reports a conflict; an identical rebind is accepted silently.
    pub(super) fn bind(&mut self, field: Field, value: i64) -> Result<(), ()> {
        if let Some((_, existing)) = self.bindings.iter().find(|(f, _)| *f == field) {
            if *existing != value {
                return Err(());
            }
            return Ok(());
        }
        self.bindings.push((field, value));
        Ok(())
    }

    pub(super) fn set_zone_id(&mut self, zone: String) {
        self.zone_id = Some(zone);
    }

    pub(super) fn add_excess_days(&mut self, days: i32) {
        self.excess_days = Some(self.excess_days.unwrap_or(0) + days);
    }

    pub(super) fn mark_leap_second(&mut self) {
        self.leap_second_seen = true;
    }

    /// Returns the bound value for `field`, if present.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<i64> {
        self.bindings.iter().find(|(f, _)| *f == field).map(|(_, v)| *v)
    }

    /// Returns all bindings currently recorded, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(Field, i64)] {
        &self.bindings
    }

    /// Returns the parsed zone id text, if a [`ZoneId`](super::node::Node::ZoneId) node matched.
    #[must_use]
    pub fn zone_id(&self) -> Option<&str> {
        self.zone_id.as_deref()
    }

    /// Returns the accumulated excess-days side channel, from hour-24 normalization.
    #[must_use]
    pub fn excess_days(&self) -> Option<i32> {
        self.excess_days
    }

    /// Returns `true` if a leap second (`60`) was seen while parsing seconds.
    #[must_use]
    pub fn leap_second_seen(&self) -> bool {
        self.leap_second_seen
    }
}

/// Mutable parser state threaded through the tree walk: case-sensitivity and
/// strictness flags plus the binding set under construction.
pub struct ParseContext {
    pub(super) case_sensitive: bool,
    pub(super) strict: bool,
    pub(super) bindings: BindingSet,
}

impl ParseContext {
    pub(super) fn new() -> Self {
        Self {
            case_sensitive: true,
            strict: true,
            bindings: BindingSet::new(),
        }
    }

    /// Snapshots the current bindings and flags so a failed [`Optional`](super::node::Node::Optional)
    /// branch can be rolled back to exactly this point.
    pub(super) fn snapshot(&self) -> (BindingSet, bool, bool) {
        (self.bindings.clone(), self.case_sensitive, self.strict)
    }

    pub(super) fn restore(&mut self, snapshot: (BindingSet, bool, bool)) {
        self.bindings = snapshot.0;
        self.case_sensitive = snapshot.1;
        self.strict = snapshot.2;
    }
}

/// A mutable cursor into parser input, mirroring `java.text.ParsePosition`.
///
/// `errorIndex` is `-1` while unset; on parse failure it is set to a non-negative
/// index into the input at which the failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsePosition {
    index: usize,
    error_index: isize,
}

impl ParsePosition {
    /// Creates a new position starting at `index` with no error set.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index, error_index: -1 }
    }

    /// Returns the current cursor index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the error index, or `-1` if no error has been recorded.
    #[must_use]
    pub const fn error_index(&self) -> isize {
        self.error_index
    }

    pub(super) fn set_index(&mut self, index: usize) {
        self.index = index;
        self.error_index = -1;
    }

    pub(super) fn set_error_index(&mut self, index: usize) {
        self.error_index = index as isize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_accepts_identical_rebind_but_rejects_conflict() {
        let mut bindings = BindingSet::new();
        assert!(bindings.bind(Field::MonthOfYear, 6).is_ok());
        assert!(bindings.bind(Field::MonthOfYear, 6).is_ok());
        assert!(bindings.bind(Field::MonthOfYear, 7).is_err());
        assert_eq!(bindings.get(Field::MonthOfYear), Some(6));
    }

    #[test]
    fn snapshot_restore_rolls_back_bindings_and_flags() {
        let mut ctx = ParseContext::new();
        ctx.bindings.bind(Field::Year, 2012).unwrap();
        let snapshot = ctx.snapshot();

        ctx.bindings.bind(Field::MonthOfYear, 6).unwrap();
        ctx.strict = false;
        ctx.restore(snapshot);

        assert_eq!(ctx.bindings.get(Field::MonthOfYear), None);
        assert_eq!(ctx.bindings.get(Field::Year), Some(2012));
        assert!(ctx.strict);
    }

    #[test]
    fn parse_position_set_index_clears_error() {
        let mut pos = ParsePosition::new(0);
        pos.set_error_index(3);
        assert_eq!(pos.error_index(), 3);
        pos.set_index(5);
        assert_eq!(pos.index(), 5);
        assert_eq!(pos.error_index(), -1);
    }
}
