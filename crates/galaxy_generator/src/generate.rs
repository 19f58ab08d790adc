use crate::{GalaxyError, GalaxyParameters, PointCloud};
use bevy::color::{LinearRgba, Mix};
use bevy::math::{Vec3, vec3};
use rand::prelude::*;
use rayon::prelude::*;
use std::f32::consts::TAU;

/// Points per rayon task in [`generate_parallel`]. Part of the seed layout, so
/// changing it changes the clouds produced for a given seed.
const CHUNK_SIZE: usize = 4096;

/// Base angle of the arm point `index` belongs to.
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches.max(1);
    (index % branches as usize) as f32 / branches as f32 * TAU
}

/// Unperturbed position on the spiral: the arm angle twisted by `radius * spin`.
pub fn spiral_point(branch_angle: f32, radius: f32, spin: f32) -> Vec3 {
    let angle = branch_angle + radius * spin;
    vec3(angle.cos() * radius, 0.0, angle.sin() * radius)
}

pub fn mix_color(inside: LinearRgba, outside: LinearRgba, factor: f32) -> [f32; 3] {
    let mixed = inside.mix(&outside, factor.clamp(0.0, 1.0));
    [
        mixed.red.clamp(0.0, 1.0),
        mixed.green.clamp(0.0, 1.0),
        mixed.blue.clamp(0.0, 1.0),
    ]
}

struct PointSampler {
    radius: f32,
    branches: u32,
    spin: f32,
    randomness: f32,
    randomness_power: f32,
    inside: LinearRgba,
    outside: LinearRgba,
}

impl PointSampler {
    fn new(params: &GalaxyParameters) -> Self {
        Self {
            radius: params.radius,
            branches: params.branches,
            spin: params.spin,
            randomness: params.randomness,
            randomness_power: params.randomness_power,
            inside: params.inside_color.to_linear(),
            outside: params.outside_color.to_linear(),
        }
    }

    fn offset<R: Rng + ?Sized>(&self, rng: &mut R, random_radius: f32) -> f32 {
        let magnitude = rng.random::<f32>().powf(self.randomness_power);
        let sign = if rng.random::<f32>() < 0.5 { 1.0 } else { -1.0 };
        magnitude * sign * self.randomness * random_radius
    }

    fn sample<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> ([f32; 3], [f32; 3]) {
        let random_radius = rng.random::<f32>() * self.radius;

        // x, y, z drawn in order
        let offset_x = self.offset(rng, random_radius);
        let offset_y = self.offset(rng, random_radius);
        let offset_z = self.offset(rng, random_radius);

        let position = spiral_point(branch_angle(index, self.branches), random_radius, self.spin)
            + vec3(offset_x, offset_y, offset_z);

        let factor = if self.radius > 0.0 {
            random_radius / self.radius
        } else {
            0.0
        };

        (
            position.to_array(),
            mix_color(self.inside, self.outside, factor),
        )
    }
}

/// Builds a cloud of `params.count` points, drawing every random value from `rng`.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> Result<PointCloud, GalaxyError> {
    params.validate()?;

    let sampler = PointSampler::new(params);
    let mut cloud = PointCloud::with_capacity(params.count);
    for index in 0..params.count {
        let (position, color) = sampler.sample(index, rng);
        cloud.push(position, color);
    }
    Ok(cloud)
}

fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    seed ^ (chunk as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Same formula as [`generate`], split into chunks sampled on the rayon pool.
/// Each chunk owns an rng derived from `seed`, so the result only depends on
/// `params` and `seed`.
pub fn generate_parallel(params: &GalaxyParameters, seed: u64) -> Result<PointCloud, GalaxyError> {
    params.validate()?;

    let sampler = PointSampler::new(params);
    let mut positions = vec![[0.0f32; 3]; params.count];
    let mut colors = vec![[0.0f32; 3]; params.count];

    positions
        .par_chunks_mut(CHUNK_SIZE)
        .zip(colors.par_chunks_mut(CHUNK_SIZE))
        .enumerate()
        .for_each(|(chunk, (positions, colors))| {
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk));
            let first = chunk * CHUNK_SIZE;
            for (offset, (position, color)) in positions.iter_mut().zip(colors).enumerate() {
                (*position, *color) = sampler.sample(first + offset, &mut rng);
            }
        });

    Ok(PointCloud::from_parts(positions, colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::color::Color;
    use bevy::math::Vec3Swizzles;
    use std::f32::consts::PI;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn angle_between(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    fn on_spiral() -> GalaxyParameters {
        GalaxyParameters {
            count: 500,
            randomness: 0.0,
            randomness_power: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_lengths_match_count() {
        let params = GalaxyParameters {
            count: 1234,
            ..Default::default()
        };
        let cloud = generate(&params, &mut seeded(1)).unwrap();
        assert_eq!(cloud.len(), 1234);
        assert_eq!(cloud.colors().len(), 1234);
        assert_eq!(cloud.flat_positions().len(), 3 * 1234);
        assert_eq!(cloud.flat_colors().len(), 3 * 1234);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let params = GalaxyParameters {
            count: 0,
            ..Default::default()
        };
        let cloud = generate(&params, &mut seeded(1)).unwrap();
        assert!(cloud.is_empty());
        assert!(generate_parallel(&params, 1).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let params = GalaxyParameters {
            branches: 0,
            ..Default::default()
        };
        assert!(generate(&params, &mut seeded(1)).is_err());
        assert!(generate_parallel(&params, 1).is_err());
    }

    #[test]
    fn test_branch_angle_depends_only_on_arm() {
        for i in 0..20 {
            assert_eq!(branch_angle(i, 4), branch_angle(i + 4, 4));
        }
        assert_eq!(branch_angle(0, 3), 0.0);
        assert!((branch_angle(1, 3) - TAU / 3.0).abs() < 1e-6);
        assert!((branch_angle(5, 3) - 2.0 * TAU / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_same_arm_and_radius_share_angle() {
        let a = spiral_point(branch_angle(2, 5), 3.0, 1.5);
        let b = spiral_point(branch_angle(7, 5), 3.0, 1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_randomness_lies_on_spiral() {
        let params = on_spiral();
        let cloud = generate(&params, &mut seeded(7)).unwrap();

        for i in 0..cloud.len() {
            let p = cloud.position(i);
            assert_eq!(p.y, 0.0);

            let r = p.xz().length();
            assert!(r <= params.radius + 1e-4);
            if r < 1e-3 {
                continue;
            }
            let expected = branch_angle(i, params.branches) + r * params.spin;
            assert!(
                angle_between(p.z.atan2(p.x), expected) < 1e-3,
                "point {i} is off its arm"
            );
        }
    }

    #[test]
    fn test_three_arm_scenario() {
        let params = GalaxyParameters {
            count: 3,
            branches: 3,
            radius: 10.0,
            spin: 0.0,
            randomness: 0.0,
            ..Default::default()
        };
        let cloud = generate(&params, &mut seeded(42)).unwrap();
        let expected = [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0];

        for (i, angle) in expected.into_iter().enumerate() {
            let p = cloud.position(i);
            let r = p.xz().length();
            assert_eq!(p.y, 0.0);
            assert!((0.0..=10.0 + 1e-4).contains(&r));
            assert!((p.x - angle.cos() * r).abs() < 1e-4);
            assert!((p.z - angle.sin() * r).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_radius_collapses_to_inside_color() {
        let params = GalaxyParameters {
            radius: 0.0,
            count: 200,
            ..Default::default()
        };
        let inside = params.inside_color.to_linear();
        let cloud = generate(&params, &mut seeded(3)).unwrap();

        for i in 0..cloud.len() {
            assert_eq!(cloud.position(i), Vec3::ZERO);
            assert_eq!(cloud.colors()[i], [inside.red, inside.green, inside.blue]);
        }
    }

    #[test]
    fn test_color_endpoints() {
        let inside = Color::srgb_u8(0xff, 0xff, 0x44).to_linear();
        let outside = Color::srgb_u8(0x44, 0xff, 0xff).to_linear();

        assert_eq!(
            mix_color(inside, outside, 0.0),
            [inside.red, inside.green, inside.blue]
        );
        let end = mix_color(inside, outside, 1.0);
        assert!((end[0] - outside.red).abs() < 1e-6);
        assert!((end[2] - outside.blue).abs() < 1e-6);
    }

    #[test]
    fn test_color_monotonic_in_radius() {
        let params = on_spiral();
        let cloud = generate(&params, &mut seeded(11)).unwrap();

        // inside is yellow, outside is cyan: red falls and blue rises with radius
        let mut samples: Vec<(f32, [f32; 3])> = (0..cloud.len())
            .map(|i| (cloud.position(i).xz().length(), cloud.colors()[i]))
            .collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));

        for pair in samples.windows(2) {
            let (near, far) = (pair[0].1, pair[1].1);
            assert!(far[0] <= near[0] + 1e-4);
            assert!(far[2] + 1e-4 >= near[2]);
        }
        for (_, color) in &samples {
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_offsets_bounded_by_randomness() {
        let params = GalaxyParameters {
            count: 2000,
            randomness: 0.5,
            ..Default::default()
        };
        let cloud = generate(&params, &mut seeded(5)).unwrap();
        let bound = params.randomness * params.radius;

        for i in 0..cloud.len() {
            assert!(cloud.position(i).y.abs() <= bound + 1e-4);
        }
    }

    #[test]
    fn test_higher_power_pulls_points_toward_arms() {
        let loose = GalaxyParameters {
            count: 4000,
            randomness: 1.0,
            randomness_power: 1.0,
            ..Default::default()
        };
        let tight = GalaxyParameters {
            randomness_power: 5.0,
            ..loose.clone()
        };
        // same seed, same draws: only the exponent differs
        let loose_cloud = generate(&loose, &mut seeded(11)).unwrap();
        let tight_cloud = generate(&tight, &mut seeded(11)).unwrap();

        let mut loose_sum = 0.0;
        let mut tight_sum = 0.0;
        for i in 0..loose_cloud.len() {
            let loose_y = loose_cloud.position(i).y.abs();
            let tight_y = tight_cloud.position(i).y.abs();
            assert!(tight_y <= loose_y + 1e-6);
            loose_sum += loose_y;
            tight_sum += tight_y;
        }
        // E[u^5] / E[u] = 1/3
        assert!(tight_sum < 0.5 * loose_sum);
        assert!(tight_sum > 0.0);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let params = GalaxyParameters::default();
        let a = generate(&params, &mut seeded(99)).unwrap();
        let b = generate(&params, &mut seeded(99)).unwrap();
        assert_eq!(a, b);

        let c = generate(&params, &mut seeded(100)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_parallel_generation_is_deterministic() {
        let params = GalaxyParameters {
            count: CHUNK_SIZE * 3 + 17,
            ..Default::default()
        };
        let a = generate_parallel(&params, 12).unwrap();
        let b = generate_parallel(&params, 12).unwrap();
        assert_eq!(a.len(), params.count);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_keeps_arm_assignment() {
        let params = GalaxyParameters {
            count: CHUNK_SIZE + 10,
            ..on_spiral()
        };
        let cloud = generate_parallel(&params, 8).unwrap();

        for i in (CHUNK_SIZE - 5)..cloud.len() {
            let p = cloud.position(i);
            let r = p.xz().length();
            if r < 1e-3 {
                continue;
            }
            let expected = branch_angle(i, params.branches) + r * params.spin;
            assert!(angle_between(p.z.atan2(p.x), expected) < 1e-3);
        }
    }
}
