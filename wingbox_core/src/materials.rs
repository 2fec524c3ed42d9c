//! # Materials
//!
//! Isotropic sheet-metal properties used by the wing box. Only the three
//! quantities the beam model needs are carried: Young's modulus for bending,
//! shear modulus for torsion, density for mass.
//!
//! ## Example
//!
//! ```rust
//! use wingbox_core::materials::Material;
//!
//! let al = Material::aluminium_4047();
//! assert_eq!(al.e_pa, 72.0e9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, WingBoxResult};

/// Isotropic material for skins, spars and stringers.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Al-4047", "e_pa": 72.0e9, "g_pa": 27.0e9, "density_kg_m3": 2660.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name
    pub name: String,
    /// Young's modulus E (Pa)
    pub e_pa: f64,
    /// Shear modulus G (Pa)
    pub g_pa: f64,
    /// Density (kg/m³)
    pub density_kg_m3: f64,
}

impl Material {
    /// Create a custom material
    pub fn new(name: impl Into<String>, e_pa: f64, g_pa: f64, density_kg_m3: f64) -> Self {
        Material {
            name: name.into(),
            e_pa,
            g_pa,
            density_kg_m3,
        }
    }

    /// Aluminium 4047, the reference wing-box material
    pub fn aluminium_4047() -> Self {
        Material::new("Al-4047", 72.0e9, 27.0e9, 2660.0)
    }

    /// Aluminium 2024-T3 sheet
    pub fn aluminium_2024_t3() -> Self {
        Material::new("Al-2024-T3", 73.1e9, 28.0e9, 2780.0)
    }

    /// Aluminium 7075-T6 plate
    pub fn aluminium_7075_t6() -> Self {
        Material::new("Al-7075-T6", 71.7e9, 26.9e9, 2810.0)
    }

    /// Bending stiffness for a given moment of inertia (N·m²)
    pub fn bending_stiffness(&self, moment_of_inertia_m4: f64) -> f64 {
        self.e_pa * moment_of_inertia_m4
    }

    /// Torsional stiffness for a given torsional constant (N·m²)
    pub fn torsional_stiffness(&self, torsional_constant_m4: f64) -> f64 {
        self.g_pa * torsional_constant_m4
    }

    /// Validate material properties.
    pub fn validate(&self) -> WingBoxResult<()> {
        require_positive("material.e_pa", self.e_pa)?;
        require_positive("material.g_pa", self.g_pa)?;
        require_positive("material.density_kg_m3", self.density_kg_m3)?;
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::aluminium_4047()
    }
}
