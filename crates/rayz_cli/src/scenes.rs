//! Built-in scenes.

use anyhow::{Context, Result};
use rand::RngCore;
use rayz_renderer::random::{gen_f32, gen_range, random_vec3};
use rayz_renderer::{
    AxisRect, CameraSettings, CheckerTexture, Color, Cuboid, Dielectric, DiffuseLight, Hittable,
    HittableList, ImageData, ImageTexture, Lambertian, Material, Metal, MovingSphere,
    NoiseTexture, RotateY, Sphere, Translate, Vec3,
};
use std::path::Path;
use std::sync::Arc;

/// File name of the texture wrapped around the earth sphere.
pub const EARTH_TEXTURE: &str = "earthmap.jpg";

/// A world plus the camera and sky that go with it.
pub struct SceneSetup {
    pub world: HittableList,
    /// Aspect ratio is left at its default; the caller sets it from the
    /// output resolution.
    pub camera: CameraSettings,
    pub background: Color,
}

/// Shared camera lens for the built-in scenes.
fn scene_camera(look_from: Vec3, look_at: Vec3, vfov: f32) -> CameraSettings {
    CameraSettings::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(vfov, 0.1, 10.0)
        .with_shutter(0.0, 1.0)
}

/// Red, green and white walls around two boxes, lit from a ceiling panel.
pub fn cornell_box() -> SceneSetup {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(AxisRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    world.add(Arc::new(AxisRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Arc::new(AxisRect::xz(213.0, 343.0, 227.0, 332.0, 554.0, light)));
    world.add(Arc::new(AxisRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())));
    world.add(Arc::new(AxisRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));
    world.add(Arc::new(AxisRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));

    let tall: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Vec3::ZERO,
        Vec3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    let tall: Arc<dyn Hittable> = Arc::new(RotateY::new(tall, 15.0));
    world.add(Arc::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0))));

    let short: Arc<dyn Hittable> = Arc::new(Cuboid::new(Vec3::ZERO, Vec3::splat(165.0), white));
    let short: Arc<dyn Hittable> = Arc::new(RotateY::new(short, -18.0));
    world.add(Arc::new(Translate::new(short, Vec3::new(130.0, 0.0, 65.0))));

    SceneSetup {
        world,
        camera: scene_camera(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            40.0,
        ),
        background: Color::ZERO,
    }
}

/// Grid of small spheres with randomly chosen materials.
///
/// Diffuse spheres bounce upward during the shutter interval. Spheres too
/// close to the big glass sphere are skipped.
fn add_small_spheres(world: &mut HittableList, rng: &mut dyn RngCore) {
    let clearing = Vec3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - clearing).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                let center1 = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                world.add(Arc::new(MovingSphere::new(
                    center,
                    center1,
                    0.0,
                    1.0,
                    0.2,
                    Arc::new(Lambertian::new(albedo)),
                )));
            } else if choose_mat < 0.95 {
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                world.add(Arc::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Metal::new(albedo, fuzz)),
                )));
            } else {
                world.add(Arc::new(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5)))));
            }
        }
    }
}

/// Spheres of every material on a checkered ground.
///
/// Fails if the earth texture cannot be read from `texture_dir`.
pub fn random_scene(rng: &mut dyn RngCore, texture_dir: &Path) -> Result<SceneSetup> {
    let checker = Arc::new(CheckerTexture::from_colors(
        Color::splat(0.9),
        Color::new(0.2, 0.3, 0.1),
    ));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::from_texture(checker.clone())),
    )));

    add_small_spheres(&mut world, rng);

    let earth_path = texture_dir.join(EARTH_TEXTURE);
    let earth = ImageData::load(&earth_path)
        .with_context(|| format!("Failed to load earth texture {}", earth_path.display()))?;

    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.5),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(2.0, 1.0, -1.5),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.7, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 1.0, 2.5),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world.add(Arc::new(Sphere::new(
        Vec3::new(5.0, 0.5, -1.0),
        0.5,
        Arc::new(Lambertian::from_texture(checker)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 0.5, 3.0),
        0.5,
        Arc::new(Lambertian::from_texture(Arc::new(NoiseTexture::new(1.0)))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(2.0, 0.5, 2.0),
        0.5,
        Arc::new(Lambertian::from_texture(Arc::new(ImageTexture::new(
            Arc::new(earth),
        )))),
    )));

    Ok(SceneSetup {
        world,
        camera: scene_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0),
        background: Color::new(1.0, 1.0, 0.6),
    })
}

/// One diffuse sphere in front of a pinhole camera, under a white sky.
pub fn simple_scene() -> SceneSetup {
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::splat(0.73))),
    )));

    SceneSetup {
        world,
        camera: CameraSettings::new(),
        background: Color::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rayz_renderer::{render_pixel, HitRecord, Interval, Ray, RenderConfig};

    fn range() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_cornell_box_layout() {
        let scene = cornell_box();
        // Six walls and two boxes
        assert_eq!(scene.world.len(), 8);
        assert_eq!(scene.background, Color::ZERO);

        let bbox = scene.world.bounding_box(0.0, 1.0).unwrap();
        assert!(bbox.min().abs_diff_eq(Vec3::ZERO, 0.01));
        assert!(bbox.max().abs_diff_eq(Vec3::splat(555.0), 0.01));
    }

    #[test]
    fn test_cornell_light_is_visible_from_floor() {
        let scene = cornell_box();
        let ray = Ray::new(Vec3::new(278.0, 1.0, 280.0), Vec3::Y, 0.0);
        let mut rec = HitRecord::default();

        assert!(scene.world.hit(&ray, range(), &mut rec));
        assert!((rec.p.y - 554.0).abs() < 1e-3);
        assert_eq!(rec.material.emitted(rec.u, rec.v, rec.p), Color::splat(15.0));
    }

    #[test]
    fn test_cornell_tall_box_blocks_view() {
        // After its turn the tall box's front face runs from (265, 295) to (424, 252)
        let scene = cornell_box();
        let ray = Ray::new(Vec3::new(348.0, 100.0, -800.0), Vec3::Z, 0.0);
        let mut rec = HitRecord::default();

        assert!(scene.world.hit(&ray, range(), &mut rec));
        assert!(rec.p.z > 252.0 && rec.p.z < 295.0, "hit at {:?}", rec.p);
    }

    #[test]
    fn test_random_scene_needs_texture() {
        let mut rng = StdRng::seed_from_u64(1);
        let missing = Path::new("/nonexistent/textures");

        let err = random_scene(&mut rng, missing).err().unwrap();
        assert!(format!("{err:#}").contains(EARTH_TEXTURE));
    }

    #[test]
    fn test_random_scene_contents() {
        let dir = std::env::temp_dir().join(format!("rayz_textures_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        rayz_renderer::save_rgb8(dir.join(EARTH_TEXTURE), 2, 1, &[0, 0, 255, 0, 255, 0]).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let scene = random_scene(&mut rng, &dir).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        // Ground, at most 22 * 22 small spheres, six feature spheres
        assert!(scene.world.len() > 7);
        assert!(scene.world.len() <= 1 + 22 * 22 + 6);
        assert_eq!(scene.background, Color::new(1.0, 1.0, 0.6));
        assert_eq!(scene.camera.look_from, Vec3::new(13.0, 2.0, 3.0));
        assert_eq!(scene.camera.vfov, 20.0);

        // Straight down outside the sphere grid lands on the ground sphere
        let ray = Ray::new(Vec3::new(-20.0, 5.0, -20.0), Vec3::NEG_Y, 0.0);
        let mut rec = HitRecord::default();
        assert!(scene.world.hit(&ray, range(), &mut rec));
        let ground_center = Vec3::new(0.0, -1000.0, 0.0);
        assert!(((rec.p - ground_center).length() - 1000.0).abs() < 0.1);
        assert!(rec.front_face);
    }

    #[test]
    fn test_random_scene_is_seed_deterministic() {
        let mut small_a = HittableList::new();
        let mut small_b = HittableList::new();
        add_small_spheres(&mut small_a, &mut StdRng::seed_from_u64(3));
        add_small_spheres(&mut small_b, &mut StdRng::seed_from_u64(3));

        assert_eq!(small_a.len(), small_b.len());
        assert_eq!(small_a.bounding_box(0.0, 1.0), small_b.bounding_box(0.0, 1.0));
    }

    #[test]
    fn test_simple_scene_center_pixel() {
        let scene = simple_scene();
        let config = RenderConfig {
            image_width: 21,
            image_height: 21,
            samples_per_pixel: 256,
            max_depth: 50,
            background: scene.background,
            ..Default::default()
        };
        let camera = scene.camera.with_aspect_ratio(config.aspect_ratio()).build();
        let mut rng = StdRng::seed_from_u64(11);

        let mean = render_pixel(&camera, &scene.world, 10, 10, &config, &mut rng)
            / config.samples_per_pixel as f32;
        for channel in mean.to_array() {
            assert!(channel > 0.0 && channel < 1.0, "mean {mean:?}");
        }
    }
}
