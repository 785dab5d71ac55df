use std::collections::HashSet;

use nalgebra::Point3;

use super::body::{BodyDescriptor, BodyId, FactSheet, MoonSpec, OrbitSpec, RingSpec};

/// A static authoring defect in the body registry. Fatal at startup.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("duplicate body key {0:?}")]
    DuplicateKey(&'static str),

    #[error("body {body:?}: radius must be positive, got {radius}")]
    BadRadius { body: &'static str, radius: f32 },

    #[error("body {body:?}: no texture path for {field}")]
    MissingTexture {
        body: &'static str,
        field: &'static str,
    },

    #[error("body {body:?}: ring inner radius {inner} is not below outer radius {outer}")]
    BadRing {
        body: &'static str,
        inner: f32,
        outer: f32,
    },

    #[error("no central body; exactly one descriptor must omit its orbit")]
    NoCentralBody,

    #[error("more than one central body: {0:?} and {1:?}")]
    ExtraCentralBody(&'static str, &'static str),
}

/// Read-only ordered collection of body descriptors, keyed by `BodyId`.
#[derive(Debug, Clone)]
pub struct Registry {
    bodies: Vec<BodyDescriptor>,
}

impl Registry {
    pub fn new(bodies: Vec<BodyDescriptor>) -> Self {
        Registry { bodies }
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyDescriptor> {
        self.bodies.get(id.0)
    }

    pub fn lookup(&self, key: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.key == key).map(BodyId)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &BodyDescriptor)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The body everything else orbits around.
    pub fn central(&self) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.orbit.is_none()).map(BodyId)
    }

    /// Checks the registry for authoring defects, returning the first found.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut keys = HashSet::new();
        let mut central: Option<&'static str> = None;

        for body in &self.bodies {
            if !keys.insert(body.key) {
                return Err(RegistryError::DuplicateKey(body.key));
            }
            if body.radius <= 0.0 {
                return Err(RegistryError::BadRadius {
                    body: body.key,
                    radius: body.radius,
                });
            }
            if body.texture.is_empty() {
                return Err(RegistryError::MissingTexture {
                    body: body.key,
                    field: "texture",
                });
            }
            if let Some(ring) = &body.ring {
                if ring.texture.is_empty() {
                    return Err(RegistryError::MissingTexture {
                        body: body.key,
                        field: "ring.texture",
                    });
                }
                if ring.inner >= ring.outer {
                    return Err(RegistryError::BadRing {
                        body: body.key,
                        inner: ring.inner,
                        outer: ring.outer,
                    });
                }
            }
            if let Some(moon) = &body.moon {
                if moon.texture.is_empty() {
                    return Err(RegistryError::MissingTexture {
                        body: body.key,
                        field: "moon.texture",
                    });
                }
                if moon.radius <= 0.0 {
                    return Err(RegistryError::BadRadius {
                        body: body.key,
                        radius: moon.radius,
                    });
                }
            }
            if body.orbit.is_none() {
                match central {
                    None => central = Some(body.key),
                    Some(first) => {
                        return Err(RegistryError::ExtraCentralBody(first, body.key));
                    }
                }
            }
        }

        match central {
            Some(_) => Ok(()),
            None => Err(RegistryError::NoCentralBody),
        }
    }
}

fn rgb(hex: u32) -> Point3<f32> {
    let r = ((hex >> 16) & 0xff) as f32;
    let g = ((hex >> 8) & 0xff) as f32;
    let b = (hex & 0xff) as f32;
    Point3::new(r / 255.0, g / 255.0, b / 255.0)
}

/// The stock nine-body system. Radii and orbit sizes are stylized so the
/// whole system fits the default camera framing; the fact sheets carry the
/// real numbers.
pub fn solar_system() -> Registry {
    let planet = |key,
                  name,
                  radius: f32,
                  texture,
                  color,
                  orbit_radius: f32,
                  orbit_speed,
                  spin_speed,
                  facts: FactSheet| BodyDescriptor {
        key,
        name,
        radius,
        texture,
        color,
        position: Point3::new(orbit_radius, 0.0, 0.0),
        orbit: Some(OrbitSpec {
            radius: orbit_radius,
            speed: orbit_speed,
        }),
        spin_speed,
        ring: None,
        moon: None,
        emissive: false,
        facts,
    };

    let mut bodies = vec![
        BodyDescriptor {
            key: "sun",
            name: "Sun",
            radius: 20.0,
            texture: "assets/sun.jpg",
            color: rgb(0xfdb813),
            position: Point3::origin(),
            orbit: None,
            spin_speed: 0.05,
            ring: None,
            moon: None,
            emissive: true,
            facts: FactSheet {
                diameter: "1,392,700 km",
                distance: "0 km",
                orbit_period: "-",
                rotation_period: "27 days",
                description: "The star at the center of the system, holding \
                              99.8% of its total mass.",
            },
        },
        planet(
            "mercury",
            "Mercury",
            3.2,
            "assets/mercury.jpg",
            rgb(0x9c8e84),
            40.0,
            4.0,
            0.04,
            FactSheet {
                diameter: "4,879 km",
                distance: "57.9 million km",
                orbit_period: "88 days",
                rotation_period: "59 days",
                description: "The smallest planet, a cratered world skimming \
                              closest to the sun.",
            },
        ),
        planet(
            "venus",
            "Venus",
            5.8,
            "assets/venus.jpg",
            rgb(0xd9b57c),
            58.0,
            1.5,
            0.02,
            FactSheet {
                diameter: "12,104 km",
                distance: "108.2 million km",
                orbit_period: "225 days",
                rotation_period: "243 days",
                description: "A runaway greenhouse wrapped in sulfuric-acid \
                              clouds; the hottest planetary surface.",
            },
        ),
        planet(
            "earth",
            "Earth",
            6.0,
            "assets/earth.jpg",
            rgb(0x4f94cd),
            80.0,
            1.0,
            1.0,
            FactSheet {
                diameter: "12,742 km",
                distance: "149.6 million km",
                orbit_period: "365.25 days",
                rotation_period: "23.9 hours",
                description: "The only known world with liquid surface water \
                              and life.",
            },
        ),
        planet(
            "mars",
            "Mars",
            4.2,
            "assets/mars.jpg",
            rgb(0xc1553d),
            100.0,
            0.8,
            0.97,
            FactSheet {
                diameter: "6,779 km",
                distance: "227.9 million km",
                orbit_period: "687 days",
                rotation_period: "24.6 hours",
                description: "The rust-red desert planet, home to the tallest \
                              volcano in the system.",
            },
        ),
        planet(
            "jupiter",
            "Jupiter",
            12.0,
            "assets/jupiter.jpg",
            rgb(0xc9a97a),
            135.0,
            0.4,
            2.4,
            FactSheet {
                diameter: "139,820 km",
                distance: "778.5 million km",
                orbit_period: "11.9 years",
                rotation_period: "9.9 hours",
                description: "A gas giant more massive than all other planets \
                              combined, with a centuries-old storm.",
            },
        ),
        planet(
            "saturn",
            "Saturn",
            10.0,
            "assets/saturn.jpg",
            rgb(0xe0cda9),
            170.0,
            0.3,
            2.2,
            FactSheet {
                diameter: "116,460 km",
                distance: "1.43 billion km",
                orbit_period: "29.5 years",
                rotation_period: "10.7 hours",
                description: "The ringed giant; its ice rings span hundreds of \
                              thousands of kilometers yet are tens of meters \
                              thick.",
            },
        ),
        planet(
            "uranus",
            "Uranus",
            7.0,
            "assets/uranus.jpg",
            rgb(0x9fd4d9),
            200.0,
            0.2,
            1.4,
            FactSheet {
                diameter: "50,724 km",
                distance: "2.87 billion km",
                orbit_period: "84 years",
                rotation_period: "17.2 hours",
                description: "An ice giant tipped on its side, rolling around \
                              its orbit.",
            },
        ),
        planet(
            "neptune",
            "Neptune",
            7.0,
            "assets/neptune.jpg",
            rgb(0x3f66c4),
            230.0,
            0.15,
            1.5,
            FactSheet {
                diameter: "49,244 km",
                distance: "4.50 billion km",
                orbit_period: "165 years",
                rotation_period: "16.1 hours",
                description: "The farthest planet, whipped by the fastest \
                              winds in the system.",
            },
        ),
    ];

    // Saturn's rings; the inner edge sits a few units off the surface.
    if let Some(i) = bodies.iter().position(|b| b.key == "saturn") {
        bodies[i].ring = Some(RingSpec {
            inner: 14.0,
            outer: 24.0,
            texture: "assets/saturn_ring.png",
        });
    }

    // Earth's moon.
    if let Some(i) = bodies.iter().position(|b| b.key == "earth") {
        bodies[i].moon = Some(MoonSpec {
            name: "Moon",
            radius: 1.6,
            texture: "assets/moon.jpg",
            color: rgb(0xb8b8b8),
            orbit: OrbitSpec {
                radius: 10.0,
                speed: 2.0,
            },
            spin_speed: 0.5,
            facts: FactSheet {
                diameter: "3,474 km",
                distance: "384,400 km from Earth",
                orbit_period: "27.3 days",
                rotation_period: "27.3 days (tidally locked)",
                description: "Earth's only natural satellite, keeping one face \
                              turned toward its planet.",
            },
        });
    }

    Registry::new(bodies)
}
