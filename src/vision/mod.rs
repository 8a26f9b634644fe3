/*!
## Rust Vision Module

The capability interface between the virtual machine and a face
recognition backend. The detector and encoder models live outside this
crate; `Blind` is the collaborator used when none is installed.

*/

mod picture;

pub use picture::Picture;

/// Face location: bounding box plus five landmarks, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// `(left, top, width, height)`
    pub rect: [f32; 4],
    pub right_eye: (f32, f32),
    pub left_eye: (f32, f32),
    pub nose_tip: (f32, f32),
    pub right_mouth: (f32, f32),
    pub left_mouth: (f32, f32),
    pub score: f32,
}

impl Detection {
    /// From the 15 value row produced by common face detectors.
    pub fn from_raw(raw: &[f32]) -> Option<Detection> {
        if raw.len() < 15 {
            return None;
        }
        Some(Detection {
            rect: [raw[0], raw[1], raw[2], raw[3]],
            right_eye: (raw[4], raw[5]),
            left_eye: (raw[6], raw[7]),
            nose_tip: (raw[8], raw[9]),
            right_mouth: (raw[10], raw[11]),
            left_mouth: (raw[12], raw[13]),
            score: raw[14],
        })
    }
}

/// Feature vector describing one face.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding(pub Vec<f32>);

/// One face register.
#[derive(Debug, Clone, Default)]
pub struct Face {
    pub detection: Option<Detection>,
    pub encoding: Option<Encoding>,
}

impl Face {
    pub fn is_empty(&self) -> bool {
        self.detection.is_none() && self.encoding.is_none()
    }
}

pub trait Vision {
    fn find_faces(&self, picture: &Picture) -> Vec<Detection>;
    fn encode_face(&self, picture: &Picture, detection: &Detection) -> Option<Encoding>;
    /// 0.0 is no match, 1.0 an exact match.
    fn face_similarity(&self, a: &Encoding, b: &Encoding) -> f64;
}

/// Finds no faces.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blind;

impl Vision for Blind {
    fn find_faces(&self, _picture: &Picture) -> Vec<Detection> {
        vec![]
    }

    fn encode_face(&self, _picture: &Picture, _detection: &Detection) -> Option<Encoding> {
        None
    }

    fn face_similarity(&self, a: &Encoding, b: &Encoding) -> f64 {
        cosine_similarity(a, b)
    }
}

/// Cosine similarity clamped to `[0, 1]`. Mismatched or zero vectors score 0.
pub fn cosine_similarity(a: &Encoding, b: &Encoding) -> f64 {
    if a.0.len() != b.0.len() || a.0.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.0.iter().zip(b.0.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b).sqrt()).max(0.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = Encoding(vec![1.0, 0.0]);
        let b = Encoding(vec![0.0, 1.0]);
        let c = Encoding(vec![2.0, 0.0]);
        let d = Encoding(vec![-1.0, 0.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert!((cosine_similarity(&a, &c) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&a, &d), 0.0);
        assert_eq!(cosine_similarity(&a, &Encoding(vec![1.0])), 0.0);
    }

    #[test]
    fn test_detection_from_raw() {
        let raw: Vec<f32> = (0..15).map(|i| i as f32).collect();
        let d = Detection::from_raw(&raw).unwrap();
        assert_eq!(d.rect, [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(d.left_mouth, (12.0, 13.0));
        assert_eq!(d.score, 14.0);
        assert!(Detection::from_raw(&raw[..14]).is_none());
    }

    #[test]
    fn test_blind() {
        let p = Picture::blank(8, 8);
        assert!(Blind.find_faces(&p).is_empty());
        assert!(Face::default().is_empty());
    }
}
