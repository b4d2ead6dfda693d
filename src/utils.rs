//! Small macro helpers shared by the concrete calendar types.

macro_rules! ensure_in_range {
    ($value:expr, $min:expr => $max:expr) => {
        if $value > $max || $value < $min {
            return Err(crate::Error::OutOfRange);
        }
    };

    ($value:ident, $max:expr) => {
        if $value > $max {
            return Err(crate::Error::OutOfRange);
        }
    };
}

pub(crate) use ensure_in_range;

/// Same as [`ensure_in_range`] but for functions that return `Option<Self>` rather
/// than `Result<Self, Error>`.
macro_rules! ensure_in_range_opt {
    ($value:expr, $min:expr => $max:expr) => {
        if $value > $max || $value < $min {
            return None;
        }
    };

    ($value:ident, $max:expr) => {
        if $value > $max {
            return None;
        }
    };
}

pub(crate) use ensure_in_range_opt;
