//! Built-in demo scenes.

use std::path::Path;
use std::sync::Arc;

use lumen_renderer::sampling::{gen_f32, gen_range, random_color, random_color_range};
use lumen_renderer::{
    BvhNode, CameraConfig, CheckerTexture, Color, Dielectric, HittableList, ImageTexture,
    Lambertian, Material, Metal, Point3, RenderMode, Sphere, Texture, Vec3,
};
use rand::RngCore;

use crate::cli::SceneKind;

/// A finalized world plus the camera it is meant to be viewed from.
pub struct Scene {
    pub world: BvhNode,
    pub camera: CameraConfig,
}

/// Build `kind`, finalizing its objects into a BVH.
///
/// `texture` is only read by the earth scene.
pub fn build(kind: SceneKind, texture: &Path, rng: &mut dyn RngCore) -> Scene {
    let (list, camera) = match kind {
        SceneKind::BouncingSpheres => bouncing_spheres(rng),
        SceneKind::CheckeredSpheres => checkered_spheres(),
        SceneKind::Earth => earth(texture),
        SceneKind::Normals => normals(),
    };

    log::info!("Scene {:?}: {} objects", kind, list.len());
    Scene {
        world: list.into_bvh(),
        camera,
    }
}

fn ground_checker() -> Arc<dyn Texture> {
    Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ))
}

fn bouncing_spheres(rng: &mut dyn RngCore) -> (HittableList, CameraConfig) {
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(ground_checker())),
    )));

    let clearing = Point3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - clearing).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse, bouncing upward during the shutter
                let albedo = random_color(rng) * random_color(rng);
                let center1 = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                world.add(Box::new(Sphere::moving(
                    center,
                    center1,
                    0.2,
                    Arc::new(Lambertian::from_color(albedo)),
                )));
            } else if choose_mat < 0.95 {
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                world.add(Box::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Metal::new(albedo, fuzz)),
                )));
            } else {
                world.add(Box::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Dielectric::new(1.5)),
                )));
            }
        }
    }

    world.add(Box::new(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::from_color(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = CameraConfig::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    (world, camera)
}

fn checkered_spheres() -> (HittableList, CameraConfig) {
    let checker: Arc<dyn Material> = Arc::new(Lambertian::new(ground_checker()));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -10.0, 0.0),
        10.0,
        checker.clone(),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, 10.0, 0.0),
        10.0,
        checker,
    )));

    let camera = CameraConfig::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    (world, camera)
}

fn earth(texture: &Path) -> (HittableList, CameraConfig) {
    let image = match ImageTexture::load(texture) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("Using placeholder texture: {}", e);
            ImageTexture::missing()
        }
    };

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::ZERO,
        2.0,
        Arc::new(Lambertian::new(Arc::new(image))),
    )));

    let camera = CameraConfig::default()
        .with_position(Point3::new(0.0, 0.0, 12.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    (world, camera)
}

fn normals() -> (HittableList, CameraConfig) {
    let grey: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.5)));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        grey.clone(),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        grey,
    )));

    let camera = CameraConfig::default().with_render_mode(RenderMode::Normals);

    (world, camera)
}
