use glam::Vec3;

use super::MeshVertex;

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

/// The four floating solid shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolyhedronKind {
    /// 20 faces.
    Icosahedron,
    /// 4 faces.
    Tetrahedron,
    /// 8 faces.
    Octahedron,
    /// 12 pentagonal faces, triangulated into 36.
    Dodecahedron,
}

impl PolyhedronKind {
    /// Base vertices on (or near) the unit sphere; they are projected onto
    /// the target radius after subdivision.
    fn base_vertices(self) -> Vec<Vec3> {
        let (t, r) = (PHI, INV_PHI);
        let flat: &[f32] = match self {
            Self::Tetrahedron => &[
                1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0,
            ],
            Self::Octahedron => &[
                1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0,
                0.0, 0.0, 1.0, 0.0, 0.0, -1.0,
            ],
            Self::Icosahedron => &[
                -1.0, t, 0.0, 1.0, t, 0.0, -1.0, -t, 0.0, 1.0, -t, 0.0, //
                0.0, -1.0, t, 0.0, 1.0, t, 0.0, -1.0, -t, 0.0, 1.0, -t, //
                t, 0.0, -1.0, t, 0.0, 1.0, -t, 0.0, -1.0, -t, 0.0, 1.0,
            ],
            Self::Dodecahedron => &[
                // (±1, ±1, ±1)
                -1.0, -1.0, -1.0, -1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0, 1.0,
                1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
                1.0, //
                // (0, ±1/φ, ±φ)
                0.0, -r, -t, 0.0, -r, t, 0.0, r, -t, 0.0, r, t, //
                // (±1/φ, ±φ, 0)
                -r, -t, 0.0, -r, t, 0.0, r, -t, 0.0, r, t, 0.0, //
                // (±φ, 0, ±1/φ)
                -t, 0.0, -r, t, 0.0, -r, -t, 0.0, r, t, 0.0, r,
            ],
        };
        flat.chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect()
    }

    fn base_faces(self) -> &'static [[usize; 3]] {
        match self {
            Self::Tetrahedron => &[[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]],
            Self::Octahedron => &[
                [0, 2, 4],
                [0, 4, 3],
                [0, 3, 5],
                [0, 5, 2],
                [1, 2, 5],
                [1, 5, 3],
                [1, 3, 4],
                [1, 4, 2],
            ],
            Self::Icosahedron => &[
                [0, 11, 5],
                [0, 5, 1],
                [0, 1, 7],
                [0, 7, 10],
                [0, 10, 11],
                [1, 5, 9],
                [5, 11, 4],
                [11, 10, 2],
                [10, 7, 6],
                [7, 1, 8],
                [3, 9, 4],
                [3, 4, 2],
                [3, 2, 6],
                [3, 6, 8],
                [3, 8, 9],
                [4, 9, 5],
                [2, 4, 11],
                [6, 2, 10],
                [8, 6, 7],
                [9, 8, 1],
            ],
            Self::Dodecahedron => &[
                [3, 11, 7],
                [3, 7, 15],
                [3, 15, 13],
                [7, 19, 17],
                [7, 17, 6],
                [7, 6, 15],
                [17, 4, 8],
                [17, 8, 10],
                [17, 10, 6],
                [8, 0, 16],
                [8, 16, 2],
                [8, 2, 10],
                [0, 12, 1],
                [0, 1, 18],
                [0, 18, 16],
                [6, 10, 2],
                [6, 2, 13],
                [6, 13, 15],
                [2, 16, 18],
                [2, 18, 3],
                [2, 3, 13],
                [18, 1, 9],
                [18, 9, 11],
                [18, 11, 3],
                [4, 14, 12],
                [4, 12, 0],
                [4, 0, 8],
                [11, 9, 5],
                [11, 5, 19],
                [11, 19, 7],
                [19, 5, 14],
                [19, 14, 4],
                [19, 4, 17],
                [1, 12, 14],
                [1, 14, 5],
                [1, 5, 9],
            ],
        }
    }
}

/// A subdivided polyhedron as a flat triangle list.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    /// Three vertices per triangle.
    pub vertices: Vec<MeshVertex>,
    /// Circumscribed radius.
    pub radius: f32,
}

impl Polyhedron {
    /// Build `kind` with circumradius `radius`. Each base face is split into
    /// `(detail + 1)²` triangles before projection onto the sphere.
    ///
    /// With `detail == 0` faces keep flat normals; subdivided shapes use the
    /// sphere normal so the icosphere reads as smooth.
    #[must_use]
    pub fn new(kind: PolyhedronKind, radius: f32, detail: u32) -> Self {
        let base = kind.base_vertices();
        let mut triangles = Vec::new();
        for face in kind.base_faces() {
            subdivide_face(
                base[face[0]],
                base[face[1]],
                base[face[2]],
                detail as usize,
                &mut triangles,
            );
        }

        let vertices = triangles
            .chunks_exact(3)
            .flat_map(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]]
                    .map(|p| p.normalize_or_zero() * radius);
                let flat = face_normal(a, b, c);
                [a, b, c].map(|p| {
                    let normal = if detail == 0 {
                        flat
                    } else {
                        p.normalize_or_zero()
                    };
                    MeshVertex::new(p, normal)
                })
            })
            .collect();

        Self { vertices, radius }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Outward-facing normal of a triangle on a convex shape centred at the
/// origin, independent of the winding.
fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let n = (b - a).cross(c - a).normalize_or_zero();
    if n.dot(a + b + c) < 0.0 {
        -n
    } else {
        n
    }
}

/// Split triangle `abc` into a grid of `(detail + 1)²` sub-triangles.
fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, detail: usize, out: &mut Vec<Vec3>) {
    let cols = detail + 1;
    let mut rows: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let span = cols - i;
        let row = (0..=span)
            .map(|j| {
                if span == 0 {
                    aj
                } else {
                    aj.lerp(bj, j as f32 / span as f32)
                }
            })
            .collect();
        rows.push(row);
    }

    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([rows[i][k + 1], rows[i + 1][k], rows[i][k]]);
            } else {
                out.extend([rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_triangle_counts() {
        let counts = [
            (PolyhedronKind::Tetrahedron, 4),
            (PolyhedronKind::Octahedron, 8),
            (PolyhedronKind::Icosahedron, 20),
            (PolyhedronKind::Dodecahedron, 36),
        ];
        for (kind, faces) in counts {
            assert_eq!(Polyhedron::new(kind, 1.0, 0).triangle_count(), faces);
        }
    }

    #[test]
    fn subdivision_multiplies_faces() {
        let ico = Polyhedron::new(PolyhedronKind::Icosahedron, 2.0, 4);
        assert_eq!(ico.triangle_count(), 20 * 25);
    }

    #[test]
    fn vertices_lie_on_the_radius() {
        for kind in [
            PolyhedronKind::Icosahedron,
            PolyhedronKind::Tetrahedron,
            PolyhedronKind::Octahedron,
            PolyhedronKind::Dodecahedron,
        ] {
            let shape = Polyhedron::new(kind, 1.5, 1);
            for v in &shape.vertices {
                let len = Vec3::from_array(v.position).length();
                assert!((len - 1.5).abs() < 1e-4, "{kind:?}: {len}");
            }
        }
    }

    #[test]
    fn flat_normals_point_outward() {
        let tet = Polyhedron::new(PolyhedronKind::Tetrahedron, 2.0, 0);
        for tri in tet.vertices.chunks_exact(3) {
            let centroid = tri
                .iter()
                .map(|v| Vec3::from_array(v.position))
                .sum::<Vec3>();
            let n = Vec3::from_array(tri[0].normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(centroid) > 0.0);
            assert_eq!(tri[0].normal, tri[2].normal);
        }
    }

    #[test]
    fn dodecahedron_faces_are_planar_pentagons() {
        // Every triple of triangles shares one face normal.
        let dodeca = Polyhedron::new(PolyhedronKind::Dodecahedron, 1.0, 0);
        let normals: Vec<Vec3> = dodeca
            .vertices
            .chunks_exact(3)
            .map(|tri| Vec3::from_array(tri[0].normal))
            .collect();
        for pentagon in normals.chunks_exact(3) {
            assert!(pentagon[0].dot(pentagon[1]) > 0.999);
            assert!(pentagon[0].dot(pentagon[2]) > 0.999);
        }
    }
}
