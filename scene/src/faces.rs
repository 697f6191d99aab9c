use std::path::Path;

use crate::{Cubemap, Error, FACE_FILES};

/// Loads the six [`FACE_FILES`] images from `dir`.
///
/// Fails on the first face that is missing, undecodable or does not match the
/// others, so a partially loaded sky is never returned.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Cubemap, Error> {
    let dir = dir.as_ref();

    let faces = FACE_FILES
        .iter()
        .map(|&face| {
            let path = dir.join(face);
            if !path.is_file() {
                return Err(Error::MissingFace { face, path });
            }
            image::open(&path)
                .map(|image| image.to_rgb8())
                .map_err(|source| Error::Image { path, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let cubemap = Cubemap::from_faces(faces)?;
    log::info!(
        "Loaded {size}x{size} cubemap from {}",
        dir.display(),
        size = cubemap.size()
    );
    Ok(cubemap)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use shared::sky::CubeSampler;

    use super::*;
    use crate::cubemap::tests::{solid_faces, FACE_COLORS};

    fn write_faces(dir: &Path, size: u32) {
        for (image, face) in solid_faces(size).into_iter().zip(FACE_FILES) {
            image.save(dir.join(face)).unwrap();
        }
    }

    #[test]
    fn loads_all_faces_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_faces(dir.path(), 8);

        let cubemap = load_dir(dir.path()).unwrap();
        assert_eq!(cubemap.size(), 8);

        let top = cubemap.sample(glam::Vec3::Y);
        let expected = glam::Vec3::from_array(FACE_COLORS[2].map(f32::from)) / 255.0;
        assert_eq!(top, expected);
    }

    #[test]
    fn missing_face_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_faces(dir.path(), 8);
        fs::remove_file(dir.path().join("top.png")).unwrap();

        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingFace { face: "top.png", .. }));
        assert!(err.to_string().contains("top.png"));
    }

    #[test]
    fn undecodable_face_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        write_faces(dir.path(), 8);
        fs::write(dir.path().join("back.png"), b"not a png").unwrap();

        assert!(matches!(load_dir(dir.path()), Err(Error::Image { .. })));
    }

    #[test]
    fn mismatched_face_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_faces(dir.path(), 8);
        image::RgbImage::new(16, 16)
            .save(dir.path().join("left.png"))
            .unwrap();

        assert!(matches!(
            load_dir(dir.path()),
            Err(Error::SizeMismatch { face: "left.png", .. })
        ));
    }
}
