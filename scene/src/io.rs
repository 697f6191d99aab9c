use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{faces, Cubemap, Error};

pub const FILE_EXTENSION: &str = "bhsky";

/// Opens a sky from either a directory of face images or a packed asset.
pub fn open(path: impl AsRef<Path>) -> Result<Cubemap, Error> {
    let path = path.as_ref();
    if path.is_dir() {
        faces::load_dir(path)
    } else if path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
        load(path)
    } else {
        Err(Error::Unsupported(path.to_owned()))
    }
}

pub fn load(file: impl AsRef<Path>) -> Result<Cubemap, Error> {
    let path = file.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    let reader = flate2::bufread::GzDecoder::new(BufReader::new(file));
    let cubemap: Cubemap = rmp_serde::decode::from_read(reader).map_err(|source| Error::Decode {
        path: path.to_owned(),
        source,
    })?;
    cubemap.validate()?;

    log::info!(
        "Loaded {size}x{size} cubemap from {}",
        path.display(),
        size = cubemap.size()
    );
    Ok(cubemap)
}

/// Packs `cubemap` next to `file`, replacing its extension, and returns the written path.
pub fn save(cubemap: &Cubemap, file: impl AsRef<Path>) -> Result<PathBuf, Error> {
    let output_filename = file.as_ref().with_extension(FILE_EXTENSION);
    let io_error = |source| Error::Io {
        path: output_filename.clone(),
        source,
    };

    let output_file = File::create(&output_filename).map_err(io_error)?;
    let mut writer =
        flate2::write::GzEncoder::new(BufWriter::new(output_file), flate2::Compression::default());
    rmp_serde::encode::write(&mut writer, cubemap).map_err(|source| Error::Encode {
        path: output_filename.clone(),
        source,
    })?;
    writer
        .finish()
        .and_then(|mut inner| inner.flush())
        .map_err(io_error)?;

    log::info!("Sky packed and saved to {}", output_filename.display());
    Ok(output_filename)
}
