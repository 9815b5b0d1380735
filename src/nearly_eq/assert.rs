//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

macro_rules! assert_nearly_eq {
    ($left:expr, $right:expr) => {{
        let (left, right) = (&$left, &$right);
        assert!(
            $crate::nearly_eq::within_default(left, right),
            "assertion failed: `left ≈ right`\n  left: `{:?}`\n right: `{:?}`",
            left,
            right
        );
    }};
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right, tolerance) = (&$left, &$right, $tolerance);
        assert!(
            $crate::nearly_eq::within(left, right, tolerance),
            "assertion failed: `left ≈ right` (tolerance `{:?}`)\n  left: `{:?}`\n right: `{:?}`",
            tolerance,
            left,
            right
        );
    }};
}
