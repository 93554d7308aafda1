//! Example: Load and inspect a Wavefront OBJ file.
//!
//! Run with: cargo run --example inspect_obj -- scenes/cornell/back-wall.obj

use std::env;

use lumo_core::wavefront::{load_mesh, MaterialPolicy};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_obj <path-to-obj-file> [--strict]");
        println!("\nExamples:");
        println!("  cargo run --example inspect_obj -- scenes/cornell/back-wall.obj");
        println!("  cargo run --example inspect_obj -- scenes/cornell/light.obj --strict");
        return;
    }

    let path = &args[1];
    let policy = if args.iter().any(|a| a == "--strict") {
        MaterialPolicy::Strict
    } else {
        MaterialPolicy::Fallback
    };
    println!("Loading OBJ file: {}", path);

    match load_mesh(path, policy) {
        Ok(mesh) => {
            println!("\n=== Mesh: {} ===", mesh.name());
            println!("Vertices: {}", mesh.vertex_count());
            println!("Triangles: {}", mesh.triangle_count());
            println!("Smooth shading: {}", mesh.smooth_shading());

            let bounds = mesh.bounds();
            println!(
                "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                bounds.x.min, bounds.y.min, bounds.z.min, bounds.x.max, bounds.y.max, bounds.z.max
            );

            let material = mesh.material();
            println!("\n--- Material '{}' ---", material.name);
            println!("  Diffuse:   {:?}", material.diffuse.to_array());
            println!("  Emission:  {:?}", material.emission.to_array());
            println!("  Roughness: {:.3}", material.roughness);
        }
        Err(e) => {
            eprintln!("Error loading OBJ: {}", e);
            std::process::exit(1);
        }
    }
}
