use glam::{vec3, Vec3};
use image::RgbImage;
use serde::{Deserialize, Serialize};

use shared::sky::CubeSampler;

use crate::Error;

/// Face files in layer order: +X, -X, +Y, -Y, +Z, -Z.
pub const FACE_FILES: [&str; 6] = [
    "right.png",
    "left.png",
    "top.png",
    "bottom.png",
    "back.png",
    "front.png",
];

const CHANNELS: usize = 3;

/// Six square RGB8 faces, sampled with bilinear filtering and clamp-to-edge wrapping.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Cubemap {
    size: u32,
    faces: Vec<Face>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
struct Face {
    /// Row-major, top row first.
    texels: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Cubemap {
    /// Takes faces in [`FACE_FILES`] order.
    pub fn from_faces(faces: Vec<RgbImage>) -> Result<Self, Error> {
        if faces.len() != FACE_FILES.len() {
            return Err(Error::FaceCount(faces.len()));
        }

        let size = faces[0].width();
        if size == 0 {
            return Err(Error::EmptyFace { face: FACE_FILES[0] });
        }

        let faces = faces
            .into_iter()
            .zip(FACE_FILES)
            .map(|(image, face)| {
                let (width, height) = image.dimensions();
                if width != height {
                    return Err(Error::NotSquare {
                        face,
                        width,
                        height,
                    });
                }
                if width != size {
                    return Err(Error::SizeMismatch {
                        face,
                        expected: size,
                        found: width,
                    });
                }
                Ok(Face {
                    texels: image.into_raw(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { size, faces })
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Checks invariants that a decoded asset cannot guarantee by construction.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.faces.len() != FACE_FILES.len() {
            return Err(Error::FaceCount(self.faces.len()));
        }

        let expected = self.size as usize * self.size as usize * CHANNELS;
        for (face, name) in self.faces.iter().zip(FACE_FILES) {
            if self.size == 0 || face.texels.len() != expected {
                return Err(Error::Corrupt {
                    face: name,
                    expected,
                    found: face.texels.len(),
                });
            }
        }
        Ok(())
    }

    fn texel(&self, layer: Layer, x: i64, y: i64) -> Vec3 {
        let last = i64::from(self.size) - 1;
        let (x, y) = (x.clamp(0, last) as usize, y.clamp(0, last) as usize);
        let offset = (y * self.size as usize + x) * CHANNELS;
        let texels = &self.faces[layer as usize].texels[offset..offset + CHANNELS];
        vec3(
            f32::from(texels[0]),
            f32::from(texels[1]),
            f32::from(texels[2]),
        ) / f32::from(u8::MAX)
    }

    fn bilinear(&self, layer: Layer, s: f32, t: f32) -> Vec3 {
        let size = self.size as f32;
        let x = s.mul_add(size, -0.5);
        let y = t.mul_add(size, -0.5);
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(layer, x0, y0).lerp(self.texel(layer, x0 + 1, y0), fx);
        let bottom = self
            .texel(layer, x0, y0 + 1)
            .lerp(self.texel(layer, x0 + 1, y0 + 1), fx);
        top.lerp(bottom, fy)
    }
}

impl Layer {
    /// Major-axis face selection, returning the face and its `[0, 1]` coordinates.
    fn project(direction: Vec3) -> (Self, f32, f32) {
        let Vec3 { x, y, z } = direction;
        let a = direction.abs();

        let (layer, sc, tc, major) = if a.x >= a.y && a.x >= a.z {
            if x > 0.0 {
                (Self::PosX, -z, -y, a.x)
            } else {
                (Self::NegX, z, -y, a.x)
            }
        } else if a.y >= a.z {
            if y > 0.0 {
                (Self::PosY, x, z, a.y)
            } else {
                (Self::NegY, x, -z, a.y)
            }
        } else if z > 0.0 {
            (Self::PosZ, x, -y, a.z)
        } else {
            (Self::NegZ, -x, -y, a.z)
        };

        (layer, 0.5 * (sc / major + 1.0), 0.5 * (tc / major + 1.0))
    }
}

impl CubeSampler for Cubemap {
    fn sample(&self, direction: Vec3) -> Vec3 {
        let (layer, s, t) = Layer::project(direction);
        self.bilinear(layer, s, t)
    }
}
