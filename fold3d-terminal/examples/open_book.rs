/// Headless walkthrough of the book core: compose page maps, build the
/// scene, toggle the hinge open, and tick the driver to convergence.
use std::time::Duration;

use fold3d_core::texture::{compose, PAGE_MAP_HEIGHT, PAGE_MAP_WIDTH};
use fold3d_core::{build_book, BookDimensions, BookDriver, BookMaterials, Material, Scene};

fn main() {
    let materials = BookMaterials {
        cover_front: Material::new(compose(
            None,
            "Greeting Card 2025",
            PAGE_MAP_WIDTH,
            PAGE_MAP_HEIGHT,
        )),
        cover_back: Material::new(compose(None, "From\nFold3D", PAGE_MAP_WIDTH, PAGE_MAP_HEIGHT)),
        page_left: Material::new(compose(
            None,
            "Happy New Year!",
            PAGE_MAP_WIDTH,
            PAGE_MAP_HEIGHT,
        )),
        page_right: Material::new(compose(
            None,
            "With love,\nFold3D",
            PAGE_MAP_WIDTH,
            PAGE_MAP_HEIGHT,
        )),
    };

    let mut scene = Scene::new();
    let graph = build_book(&mut scene, BookDimensions::default(), materials);
    let mut driver = BookDriver::new(&mut scene, graph);

    println!("closed: angle = {:.4} rad", driver.hinge().current_angle());

    driver.toggle();
    let mut frames = 0;
    while driver.hinge().current_angle() != driver.hinge().target_angle() {
        driver.tick(&mut scene, Duration::from_millis(frames * 33));
        frames += 1;
    }

    println!(
        "open after {frames} frames: angle = {:.4} rad, left pivot {:.4}, right pivot {:.4}",
        driver.hinge().current_angle(),
        scene.yaw(graph.left_pivot),
        scene.yaw(graph.right_pivot),
    );

    driver.cancel();
    assert!(!driver.tick(&mut scene, Duration::from_secs(10)));
    println!("driver cancelled, loop stops");
}
