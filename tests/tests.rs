use std::f64::consts::PI;

use approx::assert_relative_eq;

use wingworks::simulation::engine::Engine;
use wingworks::simulation::params::Parameters;
use wingworks::{
    collide_particles, integrate, Airfoil, AirfoilCollision, BoundingBox, Grid, PairPolicy, Particle, Polygon,
    Recycler, SatCollider, Scenario, ScenarioConfig, Vec2, World,
};

/// Polygon approximating a circle of radius 3 centered at (3, 0), one vertex per degree
pub fn circle_polygon() -> Polygon {
    let mut vertices = Vec::new();
    let mut angle = 0.0;
    while angle <= 2.0 * PI {
        vertices.push(Vec2::new(3.0 + 3.0 * angle.cos(), 3.0 * angle.sin()));
        angle += PI / 180.0;
    }
    Polygon::new(vertices).unwrap()
}

/// NACA 2412 with a 100 unit chord at the origin, no angle of attack
pub fn big_foil() -> Airfoil {
    Airfoil::naca2412(0.0, 0.0, 100.0, 0.0).unwrap()
}

/// Small wind tunnel parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        width: 24.0,
        height: 12.0,
        max_particle_speed: 0.01,
        wind: Vec2::new(0.1, 0.0),
    }
}

pub fn test_engine(policy: PairPolicy) -> Engine {
    Engine { pair_policy: policy, density: 2.0, cell_extent: 1.0, seed: 17 }
}

pub fn scalar_momentum(ps: &[Particle]) -> f64 {
    ps.iter().map(Particle::momentum).sum()
}

// ==================================================================================
// Geometry tests
// ==================================================================================

#[test]
fn bbox_boundary_convention() {
    let b = BoundingBox::new(-1.0, -2.0, 3.0, 4.0);
    assert!(b.contains(Vec2::new(-1.0, -2.0)));
    assert!(!b.contains(Vec2::new(3.0, 0.0)));
    assert!(!b.contains(Vec2::new(0.0, 4.0)));
    assert!(b.contains(Vec2::new(2.999, 3.999)));
}

#[test]
fn circle_containment_by_crossing_number() {
    let circle = circle_polygon();
    assert!(!circle.contains(Vec2::new(0.0, 0.0)));
    assert!(circle.contains(Vec2::new(0.1, 0.0)));
    assert!(!circle.contains(Vec2::new(6.0, 0.0)));
    assert!(circle.contains(Vec2::new(5.9, 0.0)));
    assert!(circle.contains(Vec2::new(3.0, 2.9)));
    assert!(!circle.contains(Vec2::new(3.0, -3.1)));
}

// ==================================================================================
// Particle collision tests
// ==================================================================================

#[test]
fn head_on_equal_mass_swaps_velocities() {
    let mut p1 = Particle::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    let mut p2 = Particle::new(Vec2::new(0.9, 0.0), Vec2::new(-1.0, 0.0));
    let ke0 = p1.v.norm_squared() + p2.v.norm_squared();
    let mv0 = p1.momentum() + p2.momentum();

    assert!(p1.is_colliding_with(&p2));
    p1.collide_with(&mut p2);

    assert_eq!(p1.v, -p2.v);
    assert_relative_eq!(p1.v, Vec2::new(-1.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p1.v.norm_squared() + p2.v.norm_squared(), ke0, epsilon = 1e-12);
    assert_relative_eq!(p1.momentum() + p2.momentum(), mv0, epsilon = 1e-12);
}

#[test]
fn repeated_symmetric_collision_keeps_momentum() {
    let mut p1 = Particle::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0));
    let mut p2 = Particle::new(Vec2::new(0.0, 1.0), Vec2::new(0.0, -1.0));
    let mv0 = p1.momentum() + p2.momentum();

    for i in 0..10 {
        p1.x = Vec2::new(0.0, 0.0);
        p2.x = Vec2::new(0.0, 1.0);
        assert!(p1.is_colliding_with(&p2));
        p1.collide_with(&mut p2);

        let mv = p1.momentum() + p2.momentum();
        assert!(((mv - mv0) / mv0).abs() < 1e-6, "iteration {i}: {mv0} -> {mv}");
    }
}

#[test]
fn oblique_collision_changes_scalar_momentum_only() {
    // scalar momentum is not conserved, the vector sum is
    let mut p1 = Particle::new(Vec2::new(0.01, -0.01), Vec2::new(0.5, 0.5));
    let mut p2 = Particle::new(Vec2::new(0.0, 0.0), Vec2::new(0.5, -0.5));
    let mv0 = p1.momentum() + p2.momentum();
    let vector0 = p1.v + p2.v;

    p1.collide_with(&mut p2);

    let dmv = p1.momentum() + p2.momentum() - mv0;
    assert!((dmv - -0.414213).abs() < 1e-6, "dmv = {dmv}");
    assert_relative_eq!(p1.v + p2.v, vector0, epsilon = 1e-12);
}

#[test]
fn grid_pass_resolves_each_pair_once_under_unique_policy() {
    // a pair straddling a cell corner shares four cells
    let mut ps = vec![
        Particle::new(Vec2::new(1.8, 2.0), Vec2::new(0.1, 0.0)),
        Particle::new(Vec2::new(2.2, 2.0), Vec2::new(-0.1, 0.0)),
    ];
    let mut grid = Grid::new(4.0, 4.0, 1.0);
    grid.populate(&ps, PairPolicy::Unique);

    assert_eq!(collide_particles(&mut ps, &grid, PairPolicy::Unique), 1);
    assert_relative_eq!(ps[0].v, Vec2::new(-0.1, 0.0), epsilon = 1e-12);
    assert_relative_eq!(ps[1].v, Vec2::new(0.1, 0.0), epsilon = 1e-12);
}

// ==================================================================================
// Integration tests
// ==================================================================================

#[test]
fn integration_is_linear() {
    let dx = 0.1;
    let k = 10;
    let mut p = Particle::new(Vec2::zeros(), Vec2::new(dx, 0.0));
    let mut expected = 0.0;
    for _ in 0..k {
        p.integrate();
        expected += dx;
    }
    assert_eq!(p.x, Vec2::new(expected, 0.0));
    assert_relative_eq!(p.x.x, k as f64 * dx, epsilon = 1e-12);

    let mut ps = vec![Particle::new(Vec2::zeros(), Vec2::new(dx, 0.0)); 8];
    for _ in 0..k {
        integrate(&mut ps);
    }
    assert!(ps.iter().all(|q| q.x == p.x));
}

// ==================================================================================
// Separating-axis and airfoil tests
// ==================================================================================

#[test]
fn far_particle_is_rejected_regardless_of_axis_order() {
    let foil = big_foil();
    let far = Particle::new(Vec2::new(-500.0, 400.0), Vec2::zeros());
    assert!(SatCollider::new(&foil.shape).find_contact(&far).is_none());

    let mut reversed: Vec<Vec2> = foil.shape.vertices().to_vec();
    reversed.reverse();
    let reversed = Polygon::new(reversed).unwrap();
    assert!(SatCollider::new(&reversed).find_contact(&far).is_none());
}

#[test]
fn particles_blown_into_each_edge_end_up_outside() {
    let foil = big_foil();
    let collider = AirfoilCollision::new(&foil);

    for (k, (edge, normal)) in foil.shape.edges().iter().zip(foil.shape.edge_normals()).enumerate() {
        let mid = (edge.start + edge.end) / 2.0;
        let v0 = Vec2::new(0.1, 0.0) - normal * 0.01;
        let mut p = Particle::new(mid, v0);

        let impact = collider.collide(&mut p).unwrap_or_else(|| panic!("edge {k}: no contact"));
        assert!(impact.force.norm() > 0.0, "edge {k}: no force");
        assert!(!foil.contains(p.x), "edge {k}: {:?} -> {:?} still inside", mid, p.x);
        assert!(p.v != v0, "edge {k}: velocity unchanged");
    }
}

#[test]
fn vertex_hits_end_up_outside() {
    let foil = big_foil();
    let collider = AirfoilCollision::new(&foil);
    for i in [10, 18, 25] {
        let start = foil.shape.vertices()[i] + Vec2::new(0.01, 0.01);
        let mut p = Particle::new(start, Vec2::new(0.1, 0.0));
        assert!(collider.collide(&mut p).is_some(), "vertex {i}: no contact");
        assert!(!foil.contains(p.x), "vertex {i}: {:?} -> {:?}", start, p.x);
    }
}

// ==================================================================================
// World tests
// ==================================================================================

#[test]
fn recycle_invariant_holds() {
    let foil = Airfoil::naca2412(3.0, 6.0, 8.0, 15f64.to_radians()).unwrap();
    let params = test_params();
    let recycler = Recycler::new(&params, &foil.shape);

    let mut ps: Vec<Particle> = (0..500)
        .map(|i| {
            let f = i as f64;
            Particle::new(Vec2::new(-50.0 + f * 0.31, if i % 3 == 0 { -0.5 } else { 12.5 }), Vec2::zeros())
        })
        .collect();
    assert_eq!(recycler.recycle_all(&mut ps, 1234), 500);

    for p in &ps {
        assert!(0.0 <= p.x.x && p.x.x < params.width, "x = {}", p.x.x);
        assert!(0.0 <= p.x.y && p.x.y < params.height, "y = {}", p.x.y);
        assert!(!foil.contains(p.x));
    }
}

#[test]
fn world_runs_and_forces_reset() {
    for policy in [PairPolicy::Unique, PairPolicy::Legacy] {
        let foil = Airfoil::naca2412(3.0, 6.0, 8.0, 10f64.to_radians()).unwrap();
        let num_edges = foil.num_edges();
        let mut world = World::new(foil, test_params(), test_engine(policy)).unwrap();
        assert_eq!(world.particles().len(), 576);

        for _ in 0..10 {
            world.step();
        }
        assert_eq!(world.particles().len(), 576);
        assert!(world.momentum() > 0.0);
        assert_eq!(world.edge_forces().len(), num_edges);
        // a dense gas drifting past the foil hits it
        assert!(world.force_on_foil().norm() > 0.0);

        world.reset_force_on_foil();
        assert_eq!(world.force_on_foil(), Vec2::zeros());
        assert!(world.edge_forces().iter().all(|f| f.norm() == 0.0));
    }
}

#[test]
fn default_scenario_file_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join("default.yaml");
    let text = std::fs::read_to_string(path).unwrap();
    let cfg = ScenarioConfig::from_yaml_str(&text).unwrap();
    assert_eq!(cfg.world.width, 128.0);
    assert_eq!(cfg.engine.pair_policy, PairPolicy::Unique);

    // shrink it so the test stays fast
    let mut small = cfg.clone();
    small.world.width = 16.0;
    small.world.height = 9.0;
    small.airfoil.left = 2.0;
    small.airfoil.bottom = 4.5;
    small.airfoil.width = 4.0;
    let mut scenario = Scenario::build_scenario(small).unwrap();
    assert_eq!(scenario.world.particles().len(), 1440);
    scenario.world.step();
    assert_eq!(scenario.world.steps(), 1);
}
