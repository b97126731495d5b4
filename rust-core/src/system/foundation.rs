use std::sync::Arc;

use nalgebra::DVector;

use crate::config::GEOMETRY_TOLERANCE;
use crate::error::Error;
use crate::geometries::{Primitive, Shape, TranslationalSymmetry};
use crate::interfaces::{Cartesian, Index3D, SubId};
use crate::lattice::{Hopping, Lattice};

/// Cursor to one candidate site of a [`Foundation`]
///
/// All per-site data lives in the foundation's flat arrays, indexed by `idx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    /// Unit cell index, relative to the foundation origin
    pub index: Index3D,
    pub sublattice: SubId,
    /// Flat index: `((i0 * s1 + i1) * s2 + i2) * n_sub + sub`
    pub idx: usize,
}

/// Neighbour reached through a lattice hopping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbour {
    pub site: Site,
    /// Which periodic image the target was wrapped from (zero inside the footprint)
    pub image: Index3D,
}

/// Dense enumeration of candidate sites over a block of unit cells
///
/// Sites are created for every (unit cell, sublattice) pair of the block. A site is
/// valid if it is part of the final system; invalid sites are dropped by [`finalize`].
///
/// [`finalize`]: Foundation::finalize
#[derive(Debug, Clone)]
pub struct Foundation {
    lattice: Arc<Lattice>,
    size: Index3D,
    origin: Cartesian,
    periodic: [bool; 3],
    num_sublattices: usize,
    positions: Vec<Cartesian>,
    sublattice_ids: Vec<SubId>,
    is_valid: Vec<bool>,
    /// Shape containment, kept so periodicity changes can redo trimming from scratch
    shape_mask: Option<Vec<bool>>,
    neighbour_count: Vec<i32>,
    hamiltonian_indices: Vec<i32>,
}

impl Foundation {
    /// Block of `primitive.size` unit cells centered on the origin, every site valid
    pub fn from_primitive(lattice: &Arc<Lattice>, primitive: &Primitive) -> Result<Self, Error> {
        let ndim = lattice.ndim();
        let mut size = Index3D::new(1, 1, 1);
        for i in 0..ndim {
            if primitive.size[i] < 1 {
                return Err(Error::InvalidDimensions(format!(
                    "primitive size along a{} must be at least 1, got {}",
                    i + 1,
                    primitive.size[i]
                )));
            }
            size[i] = primitive.size[i];
        }

        let mut origin = Cartesian::zeros();
        for (i, vector) in lattice.vectors().iter().enumerate() {
            origin -= (size[i] - 1) as f64 * vector / 2.0;
        }

        let mut foundation = Self::with_block(lattice, size, origin);
        foundation.is_valid.fill(true);
        foundation.reset();

        log::debug!(
            "foundation: primitive block {}x{}x{}, {} sites",
            size[0],
            size[1],
            size[2],
            foundation.num_sites()
        );
        Ok(foundation)
    }

    /// Candidate sites inside `shape`, trimmed to at least `min_neighbours` neighbours
    pub fn from_shape(lattice: &Arc<Lattice>, shape: &dyn Shape) -> Result<Self, Error> {
        let (lower, upper) = find_bounds(lattice, shape)?;
        let size = upper - lower + Index3D::new(1, 1, 1);

        let mut origin = shape.offset();
        for (i, vector) in lattice.vectors().iter().enumerate() {
            origin += lower[i] as f64 * vector;
        }

        let mut foundation = Self::with_block(lattice, size, origin);
        let mask = shape.contains(&foundation.positions);
        if mask.len() != foundation.num_sites() {
            return Err(Error::InvalidDimensions(format!(
                "shape returned {} containment flags for {} positions",
                mask.len(),
                foundation.num_sites()
            )));
        }
        foundation.shape_mask = Some(mask);
        foundation.reset();

        log::debug!(
            "foundation: shape bounds {:?}..{:?}, {} of {} sites valid",
            lower.as_slice(),
            upper.as_slice(),
            foundation.num_valid(),
            foundation.num_sites()
        );
        Ok(foundation)
    }

    /// Make lattice directions periodic: bonds leaving the block wrap around instead of
    /// being dropped. Validity and trimming are recomputed.
    pub fn with_symmetry(mut self, symmetry: TranslationalSymmetry) -> Self {
        self.periodic = symmetry.periodic;
        for i in self.lattice.ndim()..3 {
            self.periodic[i] = false;
        }
        self.reset();
        self
    }

    fn with_block(lattice: &Arc<Lattice>, size: Index3D, origin: Cartesian) -> Self {
        let num_sublattices = lattice.sublattices().len();
        let num_sites = (size[0] * size[1] * size[2]) as usize * num_sublattices;

        let mut positions = Vec::with_capacity(num_sites);
        let mut sublattice_ids = Vec::with_capacity(num_sites);
        for i0 in 0..size[0] {
            for i1 in 0..size[1] {
                for i2 in 0..size[2] {
                    for sub in 0..num_sublattices as SubId {
                        positions.push(lattice.calc_position(Index3D::new(i0, i1, i2), origin, sub));
                        sublattice_ids.push(sub);
                    }
                }
            }
        }

        Self {
            lattice: Arc::clone(lattice),
            size,
            origin,
            periodic: [false; 3],
            num_sublattices,
            positions,
            sublattice_ids,
            is_valid: vec![false; num_sites],
            shape_mask: None,
            neighbour_count: Vec::new(),
            hamiltonian_indices: Vec::new(),
        }
    }

    /// Seed validity, count neighbours and trim (shape mode only)
    fn reset(&mut self) {
        if let Some(mask) = &self.shape_mask {
            self.is_valid.copy_from_slice(mask);
        }
        self.count_neighbours();
        if self.shape_mask.is_some() {
            self.trim_edges();
        }
        self.hamiltonian_indices.clear();
    }

    fn count_neighbours(&mut self) {
        let mut counts = vec![0; self.num_sites()];
        for site in self.sites() {
            let mut count = 0;
            self.for_each_neighbour(site, |_, _| count += 1);
            counts[site.idx] = count;
        }
        self.neighbour_count = counts;
    }

    /// Remove valid sites left with fewer than `min_neighbours` valid neighbours
    ///
    /// Invalid sites are cleared from a work-list: each one decrements the count of its
    /// valid neighbours, and a neighbour that drops below the threshold is invalidated
    /// and queued in turn. Cleared sites keep a zero count, so running this again is a
    /// no-op.
    pub fn trim_edges(&mut self) {
        if self.neighbour_count.is_empty() {
            return;
        }
        let min_neighbours = self.lattice.min_neighbours();

        let mut queue: Vec<usize> = (0..self.num_sites())
            .filter(|&idx| !self.is_valid[idx] && self.neighbour_count[idx] > 0)
            .collect();
        let mut neighbours = Vec::with_capacity(self.lattice.max_hoppings());
        let mut trimmed = 0;

        while let Some(idx) = queue.pop() {
            if self.neighbour_count[idx] == 0 {
                continue;
            }
            self.neighbour_count[idx] = 0;

            neighbours.clear();
            self.for_each_neighbour(self.site_at(idx), |neighbour, _| {
                neighbours.push(neighbour.site.idx)
            });

            for &n in &neighbours {
                if !self.is_valid[n] {
                    continue;
                }
                self.neighbour_count[n] -= 1;
                if self.neighbour_count[n] < min_neighbours {
                    self.is_valid[n] = false;
                    queue.push(n);
                    trimmed += 1;
                }
            }
        }

        if trimmed > 0 {
            log::debug!("foundation: trimmed {} dangling sites", trimmed);
        }
    }

    /// Assign dense Hamiltonian indices to the valid sites, in flat index order
    ///
    /// Returns the number of valid sites. Neighbour counts are released.
    pub fn finalize(&mut self) -> usize {
        let mut next = 0;
        self.hamiltonian_indices = self
            .is_valid
            .iter()
            .map(|&valid| {
                if valid {
                    next += 1;
                    next - 1
                } else {
                    -1
                }
            })
            .collect();
        self.neighbour_count = Vec::new();
        next as usize
    }

    /// Call `f` for every neighbour of `site` reachable through a lattice hopping
    ///
    /// Targets outside the block are skipped along open directions and wrapped along
    /// periodic ones.
    pub fn for_each_neighbour<F>(&self, site: Site, mut f: F)
    where
        F: FnMut(Neighbour, &Hopping),
    {
        for hopping in self.lattice.hoppings(site.sublattice) {
            if let Some(neighbour) = self.neighbour(site, hopping) {
                f(neighbour, hopping);
            }
        }
    }

    fn neighbour(&self, site: Site, hopping: &Hopping) -> Option<Neighbour> {
        let mut index = site.index + hopping.relative_index;
        let mut image = Index3D::zeros();
        for i in 0..3 {
            if index[i] >= 0 && index[i] < self.size[i] {
                continue;
            }
            if !self.periodic[i] {
                return None;
            }
            image[i] = index[i].div_euclid(self.size[i]);
            index[i] = index[i].rem_euclid(self.size[i]);
        }

        Some(Neighbour {
            site: self.site(index, hopping.to_sublattice),
            image,
        })
    }

    pub fn site(&self, index: Index3D, sublattice: SubId) -> Site {
        let cell = ((index[0] * self.size[1] + index[1]) * self.size[2] + index[2]) as usize;
        Site {
            index,
            sublattice,
            idx: cell * self.num_sublattices + sublattice as usize,
        }
    }

    pub fn site_at(&self, idx: usize) -> Site {
        let sublattice = (idx % self.num_sublattices) as SubId;
        let cell = (idx / self.num_sublattices) as i32;
        let i2 = cell % self.size[2];
        let i1 = (cell / self.size[2]) % self.size[1];
        let i0 = cell / (self.size[2] * self.size[1]);
        Site {
            index: Index3D::new(i0, i1, i2),
            sublattice,
            idx,
        }
    }

    /// All candidate sites in flat index order
    pub fn sites(&self) -> impl Iterator<Item = Site> + '_ {
        (0..self.num_sites()).map(move |idx| self.site_at(idx))
    }

    pub fn lattice(&self) -> &Arc<Lattice> {
        &self.lattice
    }

    pub fn size(&self) -> Index3D {
        self.size
    }

    pub fn origin(&self) -> Cartesian {
        self.origin
    }

    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    pub fn num_sites(&self) -> usize {
        self.positions.len()
    }

    pub fn num_valid(&self) -> usize {
        self.is_valid.iter().filter(|&&valid| valid).count()
    }

    pub fn positions(&self) -> &[Cartesian] {
        &self.positions
    }

    pub fn sublattice_ids(&self) -> &[SubId] {
        &self.sublattice_ids
    }

    pub fn is_valid(&self) -> &[bool] {
        &self.is_valid
    }

    /// Empty after [`Foundation::finalize`]
    pub fn neighbour_count(&self) -> &[i32] {
        &self.neighbour_count
    }

    /// Empty before [`Foundation::finalize`]
    pub fn hamiltonian_indices(&self) -> &[i32] {
        &self.hamiltonian_indices
    }

    pub(crate) fn state_mut(&mut self) -> (&mut [bool], &[Cartesian], &[SubId]) {
        (&mut self.is_valid, &self.positions, &self.sublattice_ids)
    }

    pub(crate) fn positions_mut(&mut self) -> (&mut [Cartesian], &[SubId]) {
        (&mut self.positions, &self.sublattice_ids)
    }
}

/// Inclusive unit cell bounds of the block enclosing all shape vertices, padded by one cell
fn find_bounds(lattice: &Lattice, shape: &dyn Shape) -> Result<(Index3D, Index3D), Error> {
    let ndim = lattice.ndim();
    let matrix = lattice.lattice_matrix();

    // determinant relative to the cell edge lengths, independent of the length unit
    let edges: f64 = matrix.column_iter().map(|column| column.norm()).product();
    let determinant = matrix.determinant();
    if edges == 0.0 || (determinant / edges).abs() < GEOMETRY_TOLERANCE {
        return Err(Error::GeometryDegeneracy(format!(
            "primitive vectors span a degenerate cell (normalized determinant {:e})",
            if edges == 0.0 { 0.0 } else { determinant / edges }
        )));
    }
    let qr = matrix.col_piv_qr();

    let vertices = shape.vertices();
    if vertices.is_empty() {
        return Err(Error::InvalidDimensions("shape has no vertices".into()));
    }

    let mut lower = vec![f64::INFINITY; ndim];
    let mut upper = vec![f64::NEG_INFINITY; ndim];
    for vertex in &vertices {
        // Cartesian coordinates -> lattice vector coordinates
        let rhs = DVector::from_iterator(ndim, vertex.iter().take(ndim).copied());
        let v = qr.solve(&rhs).ok_or_else(|| {
            Error::GeometryDegeneracy("lattice-space solve for the shape bounds failed".into())
        })?;
        for i in 0..ndim {
            lower[i] = lower[i].min(v[i]);
            upper[i] = upper[i].max(v[i]);
        }
    }

    let mut lower_bound = Index3D::zeros();
    let mut upper_bound = Index3D::zeros();
    for i in 0..ndim {
        // pad by one cell so trimming always sees the full edge
        lower_bound[i] = lower[i].floor() as i32 - 1;
        upper_bound[i] = upper[i].ceil() as i32 + 1;
    }
    Ok((lower_bound, upper_bound))
}
