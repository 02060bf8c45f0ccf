//! Backend implementations
//!
//! The [`Backend`] trait is the seam between the [`Display`](crate::Display)
//! façade and whatever answers its requests: libX11 itself through
//! [`NativeBackend`], or the in-memory server model of [`NullBackend`].

mod r#trait;
pub use r#trait::*;

mod native;
pub use native::NativeBackend;

mod null;
pub use null::NullBackend;

use crate::error::{Error, Result};

/// Bitmap data is `height` rows of `ceil(width / 8)` bytes
pub(crate) fn check_bitmap_len(data: &[u8], width: u32, height: u32) -> Result<()> {
    let needed = (width as usize).div_ceil(8) * height as usize;
    if data.len() < needed {
        return Err(Error::InvalidArgument(format!(
            "{}x{} bitmap needs {} bytes, got {}",
            width,
            height,
            needed,
            data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_length_check() {
        assert!(check_bitmap_len(&[0; 2], 16, 1).is_ok());
        assert!(check_bitmap_len(&[0; 4], 9, 2).is_ok());
        assert!(check_bitmap_len(&[0; 3], 9, 2).is_err());
    }
}
