use std::io;

/// * Format array in a specific patterns
#[macro_export]
macro_rules! format_array {
    () => {
        "".to_string()
    };
    ($data:expr) => {
        $crate::format_array!($data, ", ", "{}")
    };
    ($data:expr, $delims:expr, $($arg:tt)*) => {
        $data.iter().map(|&v|format!($($arg)*, v)).collect::<Vec<_>>().join($delims)
    };
}

#[macro_export]
macro_rules! debugln {
    () => {
        if $crate::SHOW_DEBUG {
            println!("");
        }
    };
    ($($arg:tt)*) => {
        if $crate::SHOW_DEBUG {
            println!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! return_Err {
    ($error:expr) => {
        if $crate::PANIC_ON_ERROR {
            panic!("{:?}", $error)
        } else {
            return Err($error)
        }
    }
}

/// * A unit phasor stepped by a fixed angle.
/// * Each step is one angle-addition with `cd = 1 - cos(theta)` and `sd = sin(theta)`, followed by a first order pull of the magnitude back to 1.
/// * The phasor is never re-seeded from `sin`/`cos`, the recurrence alone carries it through the whole sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rotor {
    pub c: f64,
    pub s: f64,
    cd: f64,
    sd: f64,
}

impl Rotor {
    /// * Starts at angle zero, every `advance()` turns it by `theta` radians.
    pub fn new(theta: f64) -> Self {
        let half = libm::sin(theta * 0.5);
        Self {
            c: 1.0,
            s: 0.0,
            cd: 2.0 * half * half,
            sd: libm::sin(theta),
        }
    }

    #[inline(always)]
    pub fn advance(&mut self) {
        let c = self.c - (self.cd * self.c + self.sd * self.s);
        let s = self.s + (self.sd * self.c - self.cd * self.s);
        let g = 2.0 - (c * c + s * s);
        self.c = c * g;
        self.s = s * g;
    }
}

/// * Acquire a zeroed working buffer without aborting on allocation failure.
pub fn try_alloc_buffer<T: Copy + Default>(len: usize) -> Result<Vec<T>, io::Error> {
    let mut buf = Vec::<T>::new();
    if buf.try_reserve_exact(len).is_err() {
        return_Err!(io::Error::new(io::ErrorKind::OutOfMemory, format!("Could not acquire a working buffer of {len} elements")));
    }
    buf.resize(len, T::default());
    Ok(buf)
}

/// * Boundary check for caller-owned data arrays.
pub fn check_len(what: &str, len: usize, expected: usize) -> Result<(), io::Error> {
    if len != expected {
        return_Err!(io::Error::new(io::ErrorKind::InvalidInput, format!("The {what} array holds {len} elements, the transform needs exactly {expected}")));
    }
    Ok(())
}
