//! # Gradient Fields
//!
//! Seeded grids of pseudo-random vectors that terrain generation samples as
//! Perlin-style noise. Every cell holds a vector whose components are drawn
//! uniformly from `[-1, 1)`. The same seed always yields the same field.
//!
//! 2D fields are small (`MAX_WORLD_SIZE²` cells) and generated eagerly. A full
//! 3D field would hold `MAX_WORLD_SIZE³` cells, so 3D fields are generated
//! lazily in cubic regions of `REGION_DIMENSION³` cells, each from its own
//! seed derived from the field seed and the region coordinate. Recently used
//! regions are kept in an LRU cache; an evicted region is regenerated
//! bit-identically the next time it is needed.
//!
//! Both field types implement [`noise::NoiseFn`], with one lattice cell per
//! unit of input coordinate. Lattice coordinates wrap around the field size.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use cgmath::InnerSpace;
use lru::LruCache;
use noise::NoiseFn;

use crate::maths::{Vec2, Vec3};

/// Cells per axis of a full-size field.
pub const MAX_WORLD_SIZE: usize = 256;

/// Cells per axis of one lazily generated 3D region.
pub const REGION_DIMENSION: usize = 16;

/// Regions kept by [`generate_3d_field`].
pub const DEFAULT_CACHED_REGIONS: usize = 64;

/// Draws one gradient component, uniform in `[-1, 1)`.
fn component(rng: &mut fastrand::Rng) -> f32 {
    rng.f32() * 2.0 - 1.0
}

/// Wraps a lattice coordinate into `[0, size)`.
fn wrap(coordinate: i64, size: usize) -> usize {
    coordinate.rem_euclid(size as i64) as usize
}

/// Quintic smoothstep used to blend lattice contributions.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Generates a full-size 2D gradient field from `seed`.
pub fn generate_2d_field(seed: i64) -> GradientField2 {
    GradientField2::generate(seed, MAX_WORLD_SIZE)
}

/// Creates a full-size 3D gradient field from `seed`.
///
/// Cells are generated on first use, see [`GradientField3`].
pub fn generate_3d_field(seed: i64) -> GradientField3 {
    GradientField3::generate(seed, MAX_WORLD_SIZE, DEFAULT_CACHED_REGIONS)
}

/// A square grid of 2D gradient vectors, indexed `[x][y]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField2 {
    size: usize,
    vectors: Vec<Vec2>,
}

impl GradientField2 {
    /// Fills a `size × size` field from `seed`, x outer and y inner.
    ///
    /// A `size` of zero is treated as one.
    pub fn generate(seed: i64, size: usize) -> Self {
        let size = size.max(1);
        let mut rng = fastrand::Rng::with_seed(seed as u64);
        let vectors = (0..size * size)
            .map(|_| {
                let x = component(&mut rng);
                let y = component(&mut rng);
                Vec2::new(x, y)
            })
            .collect();

        GradientField2 { size, vectors }
    }

    /// Cells per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The gradient at lattice point `(x, y)`, wrapping out-of-range coordinates.
    pub fn vector_at(&self, x: i64, y: i64) -> Vec2 {
        self.vectors[wrap(x, self.size) * self.size + wrap(y, self.size)]
    }

    fn corner(&self, x: i64, y: i64, dx: f64, dy: f64) -> f64 {
        let offset = Vec2::new(dx as f32, dy as f32);
        self.vector_at(x, y).dot(offset) as f64
    }
}

impl NoiseFn<f64, 2> for GradientField2 {
    fn get(&self, point: [f64; 2]) -> f64 {
        let [x, y] = point;
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (ix, iy) = (x0 as i64, y0 as i64);

        let bottom = lerp(
            self.corner(ix, iy, fx, fy),
            self.corner(ix + 1, iy, fx - 1.0, fy),
            fade(fx),
        );
        let top = lerp(
            self.corner(ix, iy + 1, fx, fy - 1.0),
            self.corner(ix + 1, iy + 1, fx - 1.0, fy - 1.0),
            fade(fx),
        );
        lerp(bottom, top, fade(fy)).clamp(-1.0, 1.0)
    }
}

type Region = Arc<[Vec3]>;

/// A cubic grid of 3D gradient vectors, indexed `[x][y][z]` and generated
/// lazily per region.
pub struct GradientField3 {
    seed: i64,
    size: usize,
    regions: Mutex<LruCache<[usize; 3], Region>>,
}

impl GradientField3 {
    /// Creates a `size³` field from `seed` that keeps at most
    /// `cached_regions` regions in memory (at least one).
    pub fn generate(seed: i64, size: usize, cached_regions: usize) -> Self {
        let capacity = NonZeroUsize::new(cached_regions).unwrap_or(NonZeroUsize::MIN);
        GradientField3 {
            seed,
            size: size.max(1),
            regions: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cells per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of regions currently held in memory.
    pub fn cached_regions(&self) -> usize {
        self.regions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The gradient at lattice point `(x, y, z)`, wrapping out-of-range coordinates.
    pub fn vector_at(&self, x: i64, y: i64, z: i64) -> Vec3 {
        let cell = [wrap(x, self.size), wrap(y, self.size), wrap(z, self.size)];
        let key = cell.map(|c| c / REGION_DIMENSION);
        let [lx, ly, lz] = cell.map(|c| c % REGION_DIMENSION);

        let region = self.region(key);
        region[(lx * REGION_DIMENSION + ly) * REGION_DIMENSION + lz]
    }

    fn region(&self, key: [usize; 3]) -> Region {
        let mut regions = self
            .regions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(region) = regions.get(&key) {
            return Arc::clone(region);
        }

        let region = generate_region(region_seed(self.seed, key));
        regions.put(key, Arc::clone(&region));
        region
    }

    fn corner(&self, lattice: [i64; 3], offset: [f64; 3]) -> f64 {
        let [x, y, z] = lattice;
        let offset = Vec3::new(offset[0] as f32, offset[1] as f32, offset[2] as f32);
        self.vector_at(x, y, z).dot(offset) as f64
    }
}

impl std::fmt::Debug for GradientField3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientField3")
            .field("seed", &self.seed)
            .field("size", &self.size)
            .field("cached_regions", &self.cached_regions())
            .finish()
    }
}

/// Mixes the field seed with a region coordinate (splitmix64 finaliser).
fn region_seed(seed: i64, key: [usize; 3]) -> u64 {
    let mut hash = seed as u64;
    for (coordinate, multiplier) in key.iter().zip([
        0x9E37_79B9_7F4A_7C15u64,
        0xC2B2_AE3D_27D4_EB4F,
        0x1656_67B1_9E37_79F9,
    ]) {
        hash ^= (*coordinate as u64 + 1).wrapping_mul(multiplier);
        hash = (hash ^ (hash >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        hash = (hash ^ (hash >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        hash ^= hash >> 31;
    }
    hash
}

/// Fills one region, x outer, then y, then z inner.
fn generate_region(seed: u64) -> Region {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..REGION_DIMENSION * REGION_DIMENSION * REGION_DIMENSION)
        .map(|_| {
            let x = component(&mut rng);
            let y = component(&mut rng);
            let z = component(&mut rng);
            Vec3::new(x, y, z)
        })
        .collect()
}

impl NoiseFn<f64, 3> for GradientField3 {
    fn get(&self, point: [f64; 3]) -> f64 {
        let floor = point.map(f64::floor);
        let [fx, fy, fz] = [point[0] - floor[0], point[1] - floor[1], point[2] - floor[2]];
        let [ix, iy, iz] = floor.map(|c| c as i64);

        let mut corners = [0.0; 8];
        for (index, corner) in corners.iter_mut().enumerate() {
            let (cx, cy, cz) = (
                (index & 1) as i64,
                ((index >> 1) & 1) as i64,
                ((index >> 2) & 1) as i64,
            );
            *corner = self.corner(
                [ix + cx, iy + cy, iz + cz],
                [fx - cx as f64, fy - cy as f64, fz - cz as f64],
            );
        }

        let (u, v, w) = (fade(fx), fade(fy), fade(fz));
        let near = lerp(lerp(corners[0], corners[1], u), lerp(corners[2], corners[3], u), v);
        let far = lerp(lerp(corners[4], corners[5], u), lerp(corners[6], corners[7], u), v);
        lerp(near, far, w).clamp(-1.0, 1.0)
    }
}
