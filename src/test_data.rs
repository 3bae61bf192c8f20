/// A trimmed `gmx energy` potential-energy output, header included.
pub const ENERGY_XVG: &str = r#"# This file was created Mon Oct 19 10:12:44 2026
# Created by:
#                      :-) GROMACS - gmx energy, 2023.3 (-:
#
# gmx energy -f min.edr -o min-energy.xvg
#
@    title "GROMACS Energies"
@    xaxis  label "Time (ps)"
@    yaxis  label "(kJ/mol)"
@TYPE xy
@ view 0.15, 0.15, 0.75, 0.85
@ legend on
@ s0 legend "Potential"
    0.000000  -51234.500000
    1.000000  -51987.250000
    2.000000  -52301.000000
    3.000000  -52410.750000
    4.000000  -52398.500000
"#;
