mod framebuffer;

use std::time::Instant;

use glam::{uvec2, UVec2};
use rayon::prelude::*;
use thiserror::Error;

use shared::{inputs, sky::CubeSampler, PhysicalParams};

pub use framebuffer::{encode, Pixel};

/// CPU frame executor: runs the lensing kernel over every pixel of a frame.
pub struct Renderer<S> {
    sky: S,
    params: PhysicalParams,
    camera: inputs::Camera,
    resolution: UVec2,

    // state
    frame: u64,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("render target holds {found} bytes, a {width}x{height} RGBA8 frame needs {expected}")]
    TargetSize {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
}

impl<S: CubeSampler> Renderer<S> {
    pub fn create(
        sky: S,
        params: PhysicalParams,
        resolution: (u32, u32),
        camera: inputs::Camera,
    ) -> Self {
        firestorm::profile_method!(create);

        let mut renderer = Self {
            sky,
            params,
            camera,
            resolution: UVec2::ONE,

            frame: 0,
        };
        renderer.resize(resolution);
        renderer
    }

    /// Renders one frame at `time` seconds into `target`, RGBA8 rows top to bottom.
    pub fn render(&mut self, time: f32, target: &mut [u8]) -> Result<(), Error> {
        firestorm::profile_method!(render);

        let expected = framebuffer::byte_len(self.resolution);
        if target.len() != expected {
            return Err(Error::TargetSize {
                width: self.resolution.x,
                height: self.resolution.y,
                expected,
                found: target.len(),
            });
        }

        let started = Instant::now();
        let frame = self.frame_inputs(time);
        let sky = &self.sky;

        let pixels: &mut [Pixel] = bytemuck::cast_slice_mut(target);
        pixels
            .par_chunks_exact_mut(frame.resolution.x as usize)
            .enumerate()
            .for_each(|(row, line)| {
                for (column, pixel) in line.iter_mut().enumerate() {
                    let color = lensing::shade_row_major(&frame, sky, column as u32, row as u32);
                    *pixel = encode(color);
                }
            });

        log::debug!(
            "Frame {} ({}x{}) rendered in {:.1?}",
            self.frame,
            self.resolution.x,
            self.resolution.y,
            started.elapsed()
        );
        self.frame += 1;
        Ok(())
    }

    /// Renders a single frame into a freshly allocated image.
    pub fn snapshot(&mut self, time: f32) -> Result<image::RgbaImage, Error> {
        firestorm::profile_method!(snapshot);

        let mut image = image::RgbaImage::new(self.resolution.x, self.resolution.y);
        self.render(time, &mut image)?;
        Ok(image)
    }

    pub fn update_camera(&mut self, camera: inputs::Camera) {
        self.camera = camera;
    }

    /// Degenerate sizes are bumped to a single pixel.
    pub fn resize(&mut self, (width, height): (u32, u32)) {
        let resolution = uvec2(width, height).max(UVec2::ONE);
        if resolution != self.resolution {
            log::debug!("Resizing render target to {}x{}", resolution.x, resolution.y);
            self.resolution = resolution;
        }
    }

    pub const fn resolution(&self) -> (u32, u32) {
        (self.resolution.x, self.resolution.y)
    }

    pub const fn frames_rendered(&self) -> u64 {
        self.frame
    }

    /// The immutable context every pixel of a frame at `time` is evaluated against.
    pub const fn frame_inputs(&self, time: f32) -> inputs::Frame {
        inputs::Frame {
            resolution: self.resolution,
            camera: self.camera,
            time,
            params: self.params,
        }
    }
}
