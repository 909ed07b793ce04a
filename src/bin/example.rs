//! Beam Contact Example - node pressed onto a beam and dragged along it

use anyhow::Result;
use nalgebra::DVector;

use beam_contact::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Beam Contact Example: Pressed and Slid Node ===\n");

    //        F
    //        |  --> slide
    //        v
    //   =====s=====   section width 0.1
    //   a         b
    //  fixed     fixed
    //
    let width = 0.1;
    let press = 10.0;
    let friction = 0.3;

    let nodes = [
        Node::planar(1, 0.0, 0.0, 3),
        Node::planar(2, 1.0, 0.0, 3),
        Node::planar(3, 0.3, width / 2.0, 2),
        Node::planar(4, 0.3, width / 2.0, 2),
    ];
    let material = ContactMaterial2D::new(FrictionParams::coulomb(friction, 1.0e3))?;
    let mut element = BeamContact2D::new(1, nodes.each_ref(), material, ContactSettings::planar(width))?;

    let driver = NewtonDriver::new(SolverOptions::default().with_logging());
    let mut u = DVector::<f64>::zeros(element.num_dof());
    let mut load = DVector::<f64>::zeros(element.num_dof());
    load[7] = -press;

    println!("{:>6} {:>10} {:>12} {:>12} {:>12} {:>6}", "step", "slide", "lambda", "friction", "xi", "slip");
    for step in 1..=8 {
        let slide = 0.002 * step as f64;
        let mut prescribed: Vec<(usize, f64)> = (0..6).map(|dof| (dof, 0.0)).collect();
        prescribed.push((6, slide));

        let iterations = driver.solve_step(&mut element, &load, &prescribed, &mut u)?;
        let summary = element.summary();
        println!(
            "{step:>6} {slide:>10.4} {:>12.6} {:>12.6} {:>12.6} {:>6}   ({iterations} iterations)",
            summary.normal_force,
            summary.friction_force,
            summary.xi,
            if summary.in_slip { "yes" } else { "no" },
        );
    }

    println!("\nExpected: lambda = {press}, sliding friction = {}", friction * press);

    let reaction = element.response("primaryreaction".parse()?);
    println!("\nBeam end reactions: {:?}", reaction.as_slice());

    // Lift the node off the beam
    let mut prescribed: Vec<(usize, f64)> = (0..6).map(|dof| (dof, 0.0)).collect();
    prescribed.push((6, u[6]));
    prescribed.push((7, 0.02));
    prescribed.push((8, -1.0));
    let unloaded = DVector::<f64>::zeros(element.num_dof());
    driver.solve_step(&mut element, &unloaded, &prescribed, &mut u)?;
    println!("After pulling the multiplier negative: {:?}", element.state());

    Ok(())
}
