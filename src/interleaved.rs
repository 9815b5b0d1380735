//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

// Complex access into `[re0, im0, re1, im1, ...]` buffers.

use num_complex::Complex;

#[inline(always)]
pub fn load<T: Copy>(data: &[T], i: usize) -> Complex<T> {
    let p = i << 1;
    Complex::new(data[p], data[p + 1])
}

#[inline(always)]
pub fn store<T>(data: &mut [T], i: usize, value: Complex<T>) {
    let p = i << 1;
    data[p] = value.re;
    data[p + 1] = value.im;
}

#[inline(always)]
pub fn swap<T>(data: &mut [T], i: usize, j: usize) {
    let (p, q) = (i << 1, j << 1);
    data.swap(p, q);
    data.swap(p + 1, q + 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access() {
        let mut data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(load(&data, 1), Complex::new(2.0, 3.0));
        store(&mut data, 2, Complex::new(-1.0, -2.0));
        swap(&mut data, 0, 2);
        assert_eq!(data, [-1.0, -2.0, 2.0, 3.0, 0.0, 1.0]);
    }
}
