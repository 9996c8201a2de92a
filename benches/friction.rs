#![feature(test)]

extern crate aitios_geom;
extern crate aitios_haptics;
extern crate fixtures;
extern crate test;

use aitios_geom::Vec2;
use aitios_haptics::FrictionState;
use fixtures::tray::{make_contact, make_material, make_proxy};

#[bench]
fn friction_from_roughness(b: &mut test::Bencher) {
    let material = make_material(6);
    let contact = make_contact(&material, Vec2::new(0.81, 0.12), 0.01);
    let proxy = make_proxy(true);
    let mut surface = FrictionState::default();

    b.iter(|| proxy.test_friction(Some(&contact), &mut surface))
}

#[bench]
fn friction_bands(b: &mut test::Bencher) {
    let material = make_material(5);
    let contact = make_contact(&material, Vec2::new(0.5, 0.03), 0.01);
    let proxy = make_proxy(true);
    let mut surface = FrictionState::default();

    b.iter(|| proxy.test_friction(Some(&contact), &mut surface))
}
