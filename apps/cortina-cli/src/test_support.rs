//! Catalog used by the CLI tests, parsed through the real CSV reader.
//!
//! ```text
//! Ondas    Velo       ×2.0   labor 12,000/m   TELA 1, TELA 2, Ojaletes, Riel*, Soportes, M.O
//! Pliegue  Velo       ×2.5   labor  9,000/m   TELA 1, Botones*
//! Romana   Blackout   ×1.0   no labor         TELA 1 (factor 1.1)
//! ```

use std::path::Path;

use cortina_catalog::read_table_from_str;
use cortina_core::{Catalog, CurtainSpec, FabricSelection, PricingConfig};

pub(crate) const DESIGNS_CSV: &str = "\
Design,Type,Multiplier,LaborUnitPrice
Ondas,Velo,2,12000
Pliegue,Velo,2.5,9000
Romana,Blackout,,0
";

pub(crate) const BOM_CSV: &str = "\
Design,Supply,Unit,QuantityRule,Parameter,RequiresSelection,Notes
Ondas,TELA 1,MT,MT_ANCHO_X_MULT,,NO,Cuerpo
Ondas,TELA 2,MT,MT_ANCHO_X_MULT,0.5,NO,Forro
Ondas,Ojaletes,UND,UND_OJALES_PAR,,NO,
Ondas,Riel,MT,MT_ANCHO_X_MULT,0.5,SI,
Ondas,Soportes,UND,FIJO,2,NO,
Ondas,M.O: Ondas,MT,MT_ANCHO_X_MULT,,NO,
Pliegue,TELA 1,MT,MT_ANCHO_X_MULT,,NO,
Pliegue,Botones,UND,UND_BOTON_PAR,,SI,
Romana,TELA 1,MT,MT_ANCHO_X_MULT,1.1,NO,
";

pub(crate) const SUPPLIES_CSV: &str = "\
Supply,Unit,Reference,Color,Price
Riel,MT,R-10,Blanco,30000
Riel,MT,R-10,Negro,32000
Riel,MT,R-20,Blanco,45000
Ojaletes,UND,O-1,Plata,500
";

pub(crate) const FABRICS_CSV: &str = "\
FabricType;Reference;Color;PricePerMeter
Lino;L-100;Arena;28000
Lino;L-100;Gris;28000
Lino;L-200;Blanco;31500
Blackout;B-1;Negro;40000
";

pub(crate) fn sample_catalog() -> Catalog {
    let table = |csv: &str, name: &str| read_table_from_str(csv, Path::new(name)).unwrap();
    Catalog::load(
        &table(DESIGNS_CSV, "designs.csv"),
        &table(BOM_CSV, "bom.csv"),
        Some(&table(SUPPLIES_CSV, "supplies.csv")),
        &table(FABRICS_CSV, "fabrics.csv"),
    )
    .unwrap()
}

/// Writes the four datasets into `dir` under their default names.
pub(crate) fn write_catalog(dir: &Path) {
    std::fs::write(dir.join("designs.csv"), DESIGNS_CSV).unwrap();
    std::fs::write(dir.join("bom.csv"), BOM_CSV).unwrap();
    std::fs::write(dir.join("supplies.csv"), SUPPLIES_CSV).unwrap();
    std::fs::write(dir.join("fabrics.csv"), FABRICS_CSV).unwrap();
}

pub(crate) fn pricing() -> PricingConfig {
    PricingConfig::default()
}

/// Romana 1.0 m × 2.0 m in Lino L-100 Arena: 1.1 m × 28,000 = 30,800.
pub(crate) fn romana_spec() -> CurtainSpec {
    CurtainSpec::new(
        "Romana",
        1.0,
        2.0,
        FabricSelection::new("Lino", "L-100", "Arena", 28_000.0),
    )
}

/// Pliegue 1.2 m × 2.0 m, ×2.5, two units, no buttons chosen.
///
/// TELA 1 6.0 m × 28,000 = 168,000; labor 6.0 m × 9,000 = 54,000.
pub(crate) fn pliegue_spec() -> CurtainSpec {
    CurtainSpec::new(
        "Pliegue",
        1.2,
        2.0,
        FabricSelection::new("Lino", "L-100", "Arena", 28_000.0),
    )
    .with_multiplier(2.5)
    .with_units(2)
}
