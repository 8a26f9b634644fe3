use crate::error;
use crate::lang::Error;
use std::path::Path;
use std::sync::Arc;

/// ## Shared RGB image
///
/// Cloning a `Picture` aliases the same pixels; copying a picture
/// register never copies the image.
#[derive(Clone)]
pub struct Picture {
    inner: Arc<Pixels>,
}

struct Pixels {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl Picture {
    /// `rgb` holds `width * height` RGB triples, row major.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Option<Picture> {
        if rgb.len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(Picture {
            inner: Arc::new(Pixels { width, height, rgb }),
        })
    }

    pub fn blank(width: u32, height: u32) -> Picture {
        Picture {
            inner: Arc::new(Pixels {
                width,
                height,
                rgb: vec![0; width as usize * height as usize * 3],
            }),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Picture, Error> {
        let path = path.as_ref();
        match image::open(path) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                let (width, height) = rgb.dimensions();
                Ok(Picture {
                    inner: Arc::new(Pixels {
                        width,
                        height,
                        rgb: rgb.into_raw(),
                    }),
                })
            }
            Err(e) => Err(error!(SoftwareError; format!(
                "UNABLE TO LOAD PICTURE {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Encode by file extension, PNG or JPEG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            self.rgb(),
            self.width(),
            self.height(),
            image::ColorType::Rgb8,
        )
        .map_err(|e| {
            error!(SoftwareError; format!("UNABLE TO SAVE PICTURE {}: {}", path.display(), e))
        })
    }

    pub fn width(&self) -> u32 {
        self.inner.width
    }

    pub fn height(&self) -> u32 {
        self.inner.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.inner.rgb
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = (y as usize * self.width() as usize + x as usize) * 3;
        Some([self.inner.rgb[i], self.inner.rgb[i + 1], self.inner.rgb[i + 2]])
    }

    pub fn checksum(&self) -> u32 {
        crc::crc32::checksum_ieee(&self.inner.rgb)
    }

    /// True when both handles refer to the same image.
    pub fn same(&self, other: &Picture) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "PICTURE {}x{} CRC {:08X}",
            self.width(),
            self.height(),
            self.checksum()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        let p = Picture::blank(4, 2);
        assert_eq!(p.rgb().len(), 24);
        assert_eq!(p.pixel(3, 1), Some([0, 0, 0]));
        assert_eq!(p.pixel(4, 1), None);
    }

    #[test]
    fn test_from_rgb_checks_length() {
        assert!(Picture::from_rgb(2, 2, vec![0; 11]).is_none());
        let p = Picture::from_rgb(1, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(p.pixel(0, 0), Some([1, 2, 3]));
    }

    #[test]
    fn test_aliasing() {
        let a = Picture::blank(2, 2);
        let b = a.clone();
        assert!(a.same(&b));
        assert!(!a.same(&Picture::blank(2, 2)));
        assert_eq!(a.checksum(), Picture::blank(2, 2).checksum());
    }

    #[test]
    fn test_save_then_load() {
        let rgb = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
        let p = Picture::from_rgb(2, 2, rgb).unwrap();
        let path = std::env::temp_dir().join("drone_asm_picture_save_test.png");
        p.save(&path).unwrap();
        let loaded = Picture::load(&path).unwrap();
        assert_eq!(loaded.pixel(1, 0), Some([0, 255, 0]));
        assert_eq!(loaded.checksum(), p.checksum());
        let _ = std::fs::remove_file(&path);
        assert!(p.save("no/such/dir/picture.png").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let e = Picture::load("no/such/picture.png").unwrap_err();
        assert_eq!(e.code(), crate::lang::ErrorCode::SoftwareError);
    }
}
