//! Client-side images
//!
//! [`Image`] owns its pixel buffer and addresses pixels according to the
//! image's own byte order, bit order and scanline padding, so data fetched
//! from one server can be inspected without going back through Xlib.

use libc::{c_char, c_int, c_ulong};

use crate::error::{Error, Result};
use crate::ffi;
use crate::types::{ByteOrder, ImageFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    xoffset: u32,
    format: ImageFormat,
    depth: u32,
    byte_order: ByteOrder,
    bitmap_unit: u32,
    bitmap_bit_order: ByteOrder,
    bitmap_pad: u32,
    bits_per_pixel: u32,
    bytes_per_line: usize,
    red_mask: c_ulong,
    green_mask: c_ulong,
    blue_mask: c_ulong,
    data: Vec<u8>,
}

fn round_up(bits: usize, pad: u32) -> usize {
    let pad = pad.max(8) as usize;
    bits.div_ceil(pad) * pad / 8
}

fn check_pad(name: &str, value: u32) -> Result<()> {
    match value {
        8 | 16 | 32 => Ok(()),
        _ => Err(Error::InvalidArgument(format!("{} must be 8, 16 or 32, got {}", name, value))),
    }
}

impl Image {
    /// A zero-filled image in the host's byte and bit order, with 32-bit
    /// scanline padding
    pub fn new(format: ImageFormat, width: u32, height: u32, depth: u32, bits_per_pixel: u32) -> Result<Self> {
        if depth == 0 || depth > 32 {
            return Err(Error::InvalidArgument(format!("invalid image depth {}", depth)));
        }
        let bits_per_pixel = match format {
            ImageFormat::ZPixmap => {
                if !matches!(bits_per_pixel, 1 | 4 | 8 | 16 | 24 | 32) || bits_per_pixel < depth {
                    return Err(Error::InvalidArgument(format!(
                        "unsupported bits per pixel {} for depth {}",
                        bits_per_pixel, depth
                    )));
                }
                bits_per_pixel
            }
            ImageFormat::XYBitmap if depth != 1 => {
                return Err(Error::InvalidArgument("XYBitmap images have depth 1".into()));
            }
            _ => 1,
        };
        let mut image = Image {
            width,
            height,
            xoffset: 0,
            format,
            depth,
            byte_order: ByteOrder::native(),
            bitmap_unit: 32,
            bitmap_bit_order: ByteOrder::native(),
            bitmap_pad: 32,
            bits_per_pixel,
            bytes_per_line: 0,
            red_mask: 0,
            green_mask: 0,
            blue_mask: 0,
            data: Vec::new(),
        };
        image.relayout();
        Ok(image)
    }

    /// A depth-1 XYBitmap
    pub fn bitmap(width: u32, height: u32) -> Result<Self> {
        Self::new(ImageFormat::XYBitmap, width, height, 1, 1)
    }

    /// Wrap existing bitmap data in the layout XCreateBitmapFromData reads:
    /// LSB-first bits, rows padded to whole bytes
    pub fn from_bitmap_data(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let mut image = Self::bitmap(width, height)?;
        image.bitmap_bit_order = ByteOrder::LSBFirst;
        image.byte_order = ByteOrder::LSBFirst;
        image.bitmap_unit = 8;
        image.bitmap_pad = 8;
        image.relayout();
        let needed = image.data.len();
        if data.len() < needed {
            return Err(Error::InvalidArgument(format!(
                "bitmap data is {} bytes, {} needed",
                data.len(),
                needed
            )));
        }
        image.data.copy_from_slice(&data[..needed]);
        Ok(image)
    }

    fn relayout(&mut self) {
        let bits = match self.format {
            ImageFormat::ZPixmap => self.width as usize * self.bits_per_pixel as usize,
            _ => (self.width + self.xoffset) as usize,
        };
        self.bytes_per_line = round_up(bits, self.bitmap_pad);
        self.data = vec![0; self.bytes_per_line * self.height as usize * self.planes()];
    }

    fn planes(&self) -> usize {
        match self.format {
            ImageFormat::XYPixmap => self.depth as usize,
            _ => 1,
        }
    }

    /// Change byte order. Pixel data is cleared.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self.relayout();
        self
    }

    /// Change the bitmap unit, bit order and scanline pad. Pixel data is
    /// cleared.
    pub fn with_bitmap_format(mut self, unit: u32, bit_order: ByteOrder, pad: u32) -> Result<Self> {
        check_pad("bitmap unit", unit)?;
        check_pad("scanline pad", pad)?;
        self.bitmap_unit = unit;
        self.bitmap_bit_order = bit_order;
        self.bitmap_pad = pad;
        self.relayout();
        Ok(self)
    }

    pub fn with_masks(mut self, red: c_ulong, green: c_ulong, blue: c_ulong) -> Self {
        self.red_mask = red;
        self.green_mask = green;
        self.blue_mask = blue;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn bitmap_bit_order(&self) -> ByteOrder {
        self.bitmap_bit_order
    }

    pub fn bitmap_unit(&self) -> u32 {
        self.bitmap_unit
    }

    pub fn bitmap_pad(&self) -> u32 {
        self.bitmap_pad
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    pub fn masks(&self) -> (c_ulong, c_ulong, c_ulong) {
        (self.red_mask, self.green_mask, self.blue_mask)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte index and bit mask of bit `x` in the scanline at `row`
    fn bit_position(&self, row: usize, x: usize) -> (usize, u8) {
        let unit = self.bitmap_unit as usize;
        let unit_bytes = unit / 8;
        let bit = x % unit;
        let bitnum = match self.bitmap_bit_order {
            ByteOrder::LSBFirst => bit,
            ByteOrder::MSBFirst => unit - 1 - bit,
        };
        let byte_in_unit = match self.byte_order {
            ByteOrder::LSBFirst => bitnum / 8,
            ByteOrder::MSBFirst => unit_bytes - 1 - bitnum / 8,
        };
        let index = row + (x / unit) * unit_bytes + byte_in_unit;
        (index, 1 << (bitnum % 8))
    }

    fn get_bit(&self, row: usize, x: usize) -> bool {
        let (index, mask) = self.bit_position(row, x);
        self.data.get(index).is_some_and(|b| b & mask != 0)
    }

    fn set_bit(&mut self, row: usize, x: usize, on: bool) {
        let (index, mask) = self.bit_position(row, x);
        if let Some(byte) = self.data.get_mut(index) {
            if on {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }

    fn read_bytes(&self, offset: usize, n: usize) -> u32 {
        let bytes = &self.data[offset..offset + n];
        match self.byte_order {
            ByteOrder::MSBFirst => bytes.iter().fold(0, |acc, &b| (acc << 8) | u32::from(b)),
            ByteOrder::LSBFirst => bytes.iter().rev().fold(0, |acc, &b| (acc << 8) | u32::from(b)),
        }
    }

    fn write_bytes(&mut self, offset: usize, n: usize, value: u32) {
        let bytes = &mut self.data[offset..offset + n];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let shift = match self.byte_order {
                ByteOrder::MSBFirst => 8 * (n - 1 - i),
                ByteOrder::LSBFirst => 8 * i,
            };
            *byte = (value >> shift) as u8;
        }
    }

    fn depth_mask(&self) -> u32 {
        if self.depth >= 32 {
            u32::MAX
        } else {
            (1 << self.depth) - 1
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<c_ulong> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = y as usize * self.bytes_per_line;
        let (x, xo) = (x as usize, (x + self.xoffset) as usize);
        let plane_size = self.bytes_per_line * self.height as usize;
        let pixel = match (self.format, self.bits_per_pixel) {
            (ImageFormat::XYPixmap, _) => {
                // Most significant plane first
                (0..self.planes()).fold(0u32, |acc, p| {
                    (acc << 1) | u32::from(self.get_bit(p * plane_size + row, xo))
                })
            }
            (ImageFormat::XYBitmap, _) | (ImageFormat::ZPixmap, 1) => {
                u32::from(self.get_bit(row, xo))
            }
            (ImageFormat::ZPixmap, 4) => {
                let byte = self.data[row + x / 2];
                let high = (x % 2 == 1) == (self.byte_order == ByteOrder::LSBFirst);
                u32::from(if high { byte >> 4 } else { byte & 0x0f })
            }
            (ImageFormat::ZPixmap, bpp) => {
                let n = bpp as usize / 8;
                self.read_bytes(row + x * n, n)
            }
        };
        Some(c_ulong::from(pixel & self.depth_mask()))
    }

    /// Store a pixel; returns false when the coordinates are outside the
    /// image
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: c_ulong) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let value = (pixel as u32) & self.depth_mask();
        let row = y as usize * self.bytes_per_line;
        let (x, xo) = (x as usize, (x + self.xoffset) as usize);
        let plane_size = self.bytes_per_line * self.height as usize;
        match (self.format, self.bits_per_pixel) {
            (ImageFormat::XYPixmap, _) => {
                let planes = self.planes();
                for p in 0..planes {
                    let on = value >> (planes - 1 - p) & 1 != 0;
                    self.set_bit(p * plane_size + row, xo, on);
                }
            }
            (ImageFormat::XYBitmap, _) | (ImageFormat::ZPixmap, 1) => {
                self.set_bit(row, xo, value & 1 != 0);
            }
            (ImageFormat::ZPixmap, 4) => {
                let high = (x % 2 == 1) == (self.byte_order == ByteOrder::LSBFirst);
                let byte = &mut self.data[row + x / 2];
                if high {
                    *byte = (*byte & 0x0f) | ((value as u8) << 4);
                } else {
                    *byte = (*byte & 0xf0) | (value as u8 & 0x0f);
                }
            }
            (ImageFormat::ZPixmap, bpp) => {
                let n = bpp as usize / 8;
                self.write_bytes(row + x * n, n, value);
            }
        }
        true
    }

    /// Copy a rectangle into a new image with the same layout parameters.
    /// Parts outside this image are left zero.
    pub fn sub_image(&self, x: u32, y: u32, width: u32, height: u32) -> Image {
        let mut sub = self.clone();
        sub.width = width;
        sub.height = height;
        sub.xoffset = 0;
        sub.relayout();
        for dy in 0..height {
            for dx in 0..width {
                if let Some(pixel) = self.get_pixel(x + dx, y + dy) {
                    sub.put_pixel(dx, dy, pixel);
                }
            }
        }
        sub
    }

    /// Add a constant to every pixel
    pub fn add_pixel(&mut self, value: i64) {
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(pixel) = self.get_pixel(x, y) {
                    self.put_pixel(x, y, (pixel as i64).wrapping_add(value) as c_ulong);
                }
            }
        }
    }

    /// Copy an image produced by Xlib.
    ///
    /// # Safety
    /// `raw.data` must hold `bytes_per_line * height` bytes per plane.
    pub unsafe fn from_raw(raw: &ffi::XImage) -> Result<Self> {
        let format = ImageFormat::from_raw(raw.format)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown image format {}", raw.format)))?;
        let byte_order = ByteOrder::from_raw(raw.byte_order).unwrap_or(ByteOrder::native());
        let bitmap_bit_order = ByteOrder::from_raw(raw.bitmap_bit_order).unwrap_or(ByteOrder::native());
        let mut image = Image {
            width: raw.width.max(0) as u32,
            height: raw.height.max(0) as u32,
            xoffset: raw.xoffset.max(0) as u32,
            format,
            depth: raw.depth.max(1) as u32,
            byte_order,
            bitmap_unit: raw.bitmap_unit.max(8) as u32,
            bitmap_bit_order,
            bitmap_pad: raw.bitmap_pad.max(8) as u32,
            bits_per_pixel: raw.bits_per_pixel.max(1) as u32,
            bytes_per_line: raw.bytes_per_line.max(0) as usize,
            red_mask: raw.red_mask,
            green_mask: raw.green_mask,
            blue_mask: raw.blue_mask,
            data: Vec::new(),
        };
        let len = image.bytes_per_line * image.height as usize * image.planes();
        image.data = if raw.data.is_null() {
            vec![0; len]
        } else {
            std::slice::from_raw_parts(raw.data as *const u8, len).to_vec()
        };
        Ok(image)
    }

    /// Describe this image as an `XImage` over a copy of its data and pass it
    /// to `f`. The function table is left empty; call XInitImage to fill it.
    pub fn with_raw<R>(&self, f: impl FnOnce(*mut ffi::XImage) -> R) -> R {
        let mut data = self.data.clone();
        let mut raw = ffi::XImage {
            width: self.width as c_int,
            height: self.height as c_int,
            xoffset: self.xoffset as c_int,
            format: self.format.to_raw(),
            data: data.as_mut_ptr() as *mut c_char,
            byte_order: self.byte_order.to_raw(),
            bitmap_unit: self.bitmap_unit as c_int,
            bitmap_bit_order: self.bitmap_bit_order.to_raw(),
            bitmap_pad: self.bitmap_pad as c_int,
            depth: self.depth as c_int,
            bytes_per_line: self.bytes_per_line as c_int,
            bits_per_pixel: self.bits_per_pixel as c_int,
            red_mask: self.red_mask,
            green_mask: self.green_mask,
            blue_mask: self.blue_mask,
            ..Default::default()
        };
        f(&mut raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zpixmap_32bpp() {
        let mut image = Image::new(ImageFormat::ZPixmap, 4, 2, 24, 32)
            .unwrap()
            .with_byte_order(ByteOrder::LSBFirst);
        assert_eq!(image.bytes_per_line(), 16);

        assert!(image.put_pixel(1, 1, 0x123456));
        assert_eq!(image.get_pixel(1, 1), Some(0x123456));
        assert_eq!(&image.data()[20..24], &[0x56, 0x34, 0x12, 0x00]);
        assert!(!image.put_pixel(4, 0, 1));
        assert_eq!(image.get_pixel(0, 2), None);
    }

    #[test]
    fn test_msb_first_16bpp() {
        let mut image = Image::new(ImageFormat::ZPixmap, 3, 1, 16, 16)
            .unwrap()
            .with_byte_order(ByteOrder::MSBFirst);
        image.put_pixel(2, 0, 0xabcd);
        assert_eq!(&image.data()[4..6], &[0xab, 0xcd]);
        assert_eq!(image.bytes_per_line(), 8);
    }

    #[test]
    fn test_24bpp_packing() {
        let mut image = Image::new(ImageFormat::ZPixmap, 2, 1, 24, 24)
            .unwrap()
            .with_byte_order(ByteOrder::MSBFirst);
        image.put_pixel(1, 0, 0x010203);
        assert_eq!(&image.data()[3..6], &[0x01, 0x02, 0x03]);
        assert_eq!(image.get_pixel(1, 0), Some(0x010203));
    }

    #[test]
    fn test_bitmap_data_layout() {
        // 10x2 bitmap, rows padded to 2 bytes, LSB-first bits
        let data = [0b0000_0101, 0b0000_0010, 0xff, 0x00];
        let image = Image::from_bitmap_data(10, 2, &data).unwrap();
        assert_eq!(image.bytes_per_line(), 2);
        assert_eq!(image.get_pixel(0, 0), Some(1));
        assert_eq!(image.get_pixel(1, 0), Some(0));
        assert_eq!(image.get_pixel(2, 0), Some(1));
        assert_eq!(image.get_pixel(9, 0), Some(1));
        assert_eq!(image.get_pixel(7, 1), Some(1));
        assert_eq!(image.get_pixel(8, 1), Some(0));

        assert!(Image::from_bitmap_data(10, 2, &data[..3]).is_err());
    }

    #[test]
    fn test_bitmap_data_trailing_bytes_ignored() {
        let data = [0x01, 0x80, 0xaa, 0xbb];
        let image = Image::from_bitmap_data(8, 2, &data).unwrap();
        assert_eq!(image.data(), &[0x01, 0x80]);
        assert_eq!(image.get_pixel(0, 0), Some(1));
        assert_eq!(image.get_pixel(7, 1), Some(1));
    }

    #[test]
    fn test_msb_bit_order() {
        let mut image = Image::bitmap(8, 1)
            .unwrap()
            .with_bitmap_format(8, ByteOrder::MSBFirst, 8)
            .unwrap();
        image.put_pixel(0, 0, 1);
        assert_eq!(image.data()[0], 0x80);
    }

    #[test]
    fn test_xypixmap_planes() {
        let mut image = Image::new(ImageFormat::XYPixmap, 8, 1, 2, 0)
            .unwrap()
            .with_bitmap_format(8, ByteOrder::LSBFirst, 8)
            .unwrap();
        image.put_pixel(3, 0, 0b10);
        assert_eq!(image.data(), &[0b0000_1000, 0]);
        assert_eq!(image.get_pixel(3, 0), Some(2));
    }

    #[test]
    fn test_sub_image_and_add_pixel() {
        let mut image = Image::new(ImageFormat::ZPixmap, 4, 4, 8, 8).unwrap();
        image.put_pixel(2, 2, 9);
        let mut sub = image.sub_image(2, 2, 2, 2);
        assert_eq!(sub.get_pixel(0, 0), Some(9));
        sub.add_pixel(1);
        assert_eq!(sub.get_pixel(0, 0), Some(10));
        assert_eq!(sub.get_pixel(1, 1), Some(1));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Image::new(ImageFormat::ZPixmap, 1, 1, 24, 16).is_err());
        assert!(Image::new(ImageFormat::XYBitmap, 1, 1, 8, 1).is_err());
        assert!(Image::new(ImageFormat::ZPixmap, 1, 1, 0, 8).is_err());
    }

    #[test]
    fn test_raw_round_trip() {
        let mut image = Image::new(ImageFormat::ZPixmap, 3, 3, 24, 32).unwrap();
        image.put_pixel(2, 1, 0xff00ff);
        let copy = image.with_raw(|raw| unsafe { Image::from_raw(&*raw) }).unwrap();
        assert_eq!(copy, image);
    }
}
