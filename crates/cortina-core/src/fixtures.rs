//! Shared test catalog.
//!
//! ```text
//! Ondas    Velo       ×2.0   labor 12,000/m   TELA 1, TELA 2, Ojaletes, Riel*, Soportes, M.O
//! Pliegue  Velo       ×2.5   labor  9,000/m   TELA 1, Botones*
//! Romana   Blackout   ×1.0   no labor         TELA 1
//!                                              (* requires selection)
//! ```

use crate::catalog::{Catalog, RawTable};
use crate::curtain::{CurtainSpec, FabricSelection};

pub(crate) fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

pub(crate) fn sample_designs() -> RawTable {
    raw(
        &["Design", "Type", "Multiplier", "LaborUnitPrice"],
        &[
            &["Ondas", "Velo", "2", "12000"],
            &["Pliegue", "Velo", "2.5", "9000"],
            &["Romana", "Blackout", "", "0"],
        ],
    )
}

pub(crate) fn sample_bom() -> RawTable {
    raw(
        &["Diseño", "Insumo", "Unidad", "ReglaCantidad", "Parametro", "DependeDeSeleccion", "Observaciones"],
        &[
            &["Ondas", "TELA 1", "MT", "MT_ANCHO_X_MULT", "", "NO", "Cuerpo"],
            &["Ondas", "TELA 2", "MT", "MT_ANCHO_X_MULT", "0.5", "NO", "Forro"],
            &["Ondas", "Ojaletes", "UND", "UND_OJALES_PAR", "", "NO", ""],
            &["Ondas", "Riel", "MT", "MT_ANCHO_X_MULT", "0.5", "SI", ""],
            &["Ondas", "Soportes", "UND", "FIJO", "2", "NO", ""],
            &["Ondas", "M.O: Ondas", "MT", "MT_ANCHO_X_MULT", "", "NO", ""],
            &["Pliegue", "TELA 1", "MT", "MT_ANCHO_X_MULT", "", "NO", ""],
            &["Pliegue", "Botones", "UND", "UND_BOTON_PAR", "", "SI", ""],
            &["Romana", "TELA 1", "MT", "MT_ANCHO_X_MULT", "1.1", "NO", ""],
        ],
    )
}

pub(crate) fn sample_supplies() -> RawTable {
    raw(
        &["Insumo", "Unidad", "Ref", "Color", "PVP"],
        &[
            &["Riel", "MT", "R-10", "Blanco", "30000"],
            &["Riel", "MT", "R-10", "Negro", "32000"],
            &["Riel", "MT", "R-20", "Blanco", "45000"],
            &["Ojaletes", "UND", "O-1", "Plata", "500"],
        ],
    )
}

pub(crate) fn sample_fabrics() -> RawTable {
    raw(
        &["TipoTela", "Referencia", "Color", "PVP/Metro ($)"],
        &[
            &["Lino", "L-100", "Arena", "28000"],
            &["Lino", "L-100", "Gris", "28000"],
            &["Lino", "L-200", "Blanco", "31500"],
            &["Blackout", "B-1", "Negro", "40000"],
        ],
    )
}

pub(crate) fn sample_catalog() -> Catalog {
    Catalog::load(
        &sample_designs(),
        &sample_bom(),
        Some(&sample_supplies()),
        &sample_fabrics(),
    )
    .expect("sample catalog loads")
}

/// Primary fabric Lino L-100 Arena at 28,000/m.
pub(crate) fn lino() -> FabricSelection {
    FabricSelection::new("Lino", "L-100", "Arena", 28_000.0)
}

/// One 1.0 m × 2.0 m curtain of the given design with the Lino fabric.
pub(crate) fn simple_spec(design: &str, multiplier: f64) -> CurtainSpec {
    CurtainSpec::new(design, 1.0, 2.0, lino()).with_multiplier(multiplier)
}
