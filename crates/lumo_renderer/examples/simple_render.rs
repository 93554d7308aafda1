//! Simple path tracer example.
//!
//! Builds a small box with an overhead light in code and saves it as PPM.
//!
//! Run with: cargo run --release --example simple_render

use lumo_core::{Material, Mesh};
use lumo_renderer::{render, save_ppm, Camera, Color, RenderConfig, Scene, Vec3};

fn main() {
    env_logger::init();

    println!("Lumo Path Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!(
        "Scene built in {:?}: {} meshes, {} triangles",
        start.elapsed(),
        scene.len(),
        scene.triangle_count()
    );

    let camera = Camera::new(240, 240);
    let config = RenderConfig {
        samples: 32,
        max_bounces: 4,
        ..Default::default()
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width, camera.image_height, config.samples
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &camera, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    if let Err(e) = save_ppm(&image, filename) {
        eprintln!("Failed to save {}: {}", filename, e);
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

/// Square spanned by half-extents `u` and `v` around `center`.
fn quad(name: &str, center: Vec3, u: Vec3, v: Vec3, material: Material) -> Mesh {
    Mesh::new(
        name,
        vec![center - u - v, center + u - v, center + u + v, center - u + v],
        vec![[0, 1, 2], [0, 2, 3]],
        false,
        material,
    )
}

fn build_scene() -> Scene {
    let white = Material::new("white", Color::splat(0.75)).with_roughness(1.0);
    let red = Material::new("red", Color::new(0.75, 0.1, 0.1)).with_roughness(1.0);
    let green = Material::new("green", Color::new(0.1, 0.75, 0.1)).with_roughness(1.0);
    let mirror = Material::new("mirror", Color::splat(0.9)).with_roughness(0.05);
    let light = Material::new("light", Color::ONE).with_emission(Color::splat(4.0));

    let mut scene = Scene::new();
    scene.add(quad("floor", Vec3::new(0.0, -2.0, -2.0), Vec3::X * 2.0, Vec3::Z * 2.0, white.clone()));
    scene.add(quad("ceiling", Vec3::new(0.0, 2.0, -2.0), Vec3::X * 2.0, Vec3::Z * 2.0, white.clone()));
    scene.add(quad("back", Vec3::new(0.0, 0.0, -4.0), Vec3::X * 2.0, Vec3::Y * 2.0, white));
    scene.add(quad("left", Vec3::new(-2.0, 0.0, -2.0), Vec3::Y * 2.0, Vec3::Z * 2.0, red));
    scene.add(quad("right", Vec3::new(2.0, 0.0, -2.0), Vec3::Y * 2.0, Vec3::Z * 2.0, green));
    scene.add(quad("light", Vec3::new(0.0, 1.99, -2.0), Vec3::X * 0.6, Vec3::Z * 0.6, light));
    scene.add(quad(
        "reflector",
        Vec3::new(0.6, -1.0, -2.8),
        Vec3::new(0.6, 0.0, 0.4),
        Vec3::Y * 0.9,
        mirror,
    ));
    scene
}
