//! The reference catalog of analytical queries over the `materials` table.
//!
//! These statements target MySQL 8 (window functions, `STDDEV`,
//! `SUBSTRING_INDEX`). A deployment may replace the whole catalog through its
//! configuration.

use super::catalog::QueryDefinition;

/// All reference queries, in display order.
pub fn definitions() -> Vec<QueryDefinition> {
    vec![
        QueryDefinition::new(
            "A1",
            "Crystal System Analysis",
            "Average band gap and formation energy for each crystal system",
            r"SELECT
    crystal_system,
    COUNT(*) AS material_count,
    ROUND(AVG(band_gap), 3) AS avg_band_gap_eV,
    ROUND(AVG(formation_energy_per_atom), 3) AS avg_formation_energy_eV_per_atom
FROM materials
WHERE crystal_system IS NOT NULL
    AND band_gap IS NOT NULL
    AND formation_energy_per_atom IS NOT NULL
GROUP BY crystal_system
ORDER BY material_count DESC",
        ),
        QueryDefinition::new(
            "A2",
            "Large Crystal Systems",
            "Crystal systems with more than 5 materials",
            r"SELECT
    crystal_system,
    COUNT(*) AS material_count,
    ROUND(AVG(band_gap), 3) AS avg_band_gap
FROM materials
WHERE crystal_system IS NOT NULL
GROUP BY crystal_system
HAVING COUNT(*) > 5
ORDER BY material_count DESC",
        ),
        QueryDefinition::new(
            "A3",
            "Stability by Composition",
            "Comparison of materials by number of elements",
            r"SELECT
    nelements,
    COUNT(*) AS material_count,
    ROUND(MIN(formation_energy_per_atom), 3) AS most_stable_formation_energy,
    ROUND(AVG(formation_energy_per_atom), 3) AS avg_formation_energy,
    COUNT(CASE WHEN is_stable = 1 THEN 1 END) AS stable_materials_count
FROM materials
WHERE nelements BETWEEN 1 AND 6
    AND formation_energy_per_atom IS NOT NULL
GROUP BY nelements
ORDER BY nelements",
        ),
        QueryDefinition::new(
            "A4",
            "Tellurium Materials",
            "Materials containing Tellurium (Te)",
            r"SELECT
    material_id,
    formula_pretty,
    elements,
    band_gap,
    crystal_system,
    formation_energy_per_atom
FROM materials
WHERE elements LIKE '%Te%'
    AND band_gap IS NOT NULL
ORDER BY band_gap DESC",
        ),
        QueryDefinition::new(
            "B1",
            "Above Average Band Gap",
            "Materials with band gaps greater than database average",
            r"SELECT
    m.material_id,
    m.formula_pretty,
    m.band_gap,
    m.crystal_system,
    m.formation_energy_per_atom
FROM materials m
WHERE m.band_gap > (SELECT AVG(band_gap) FROM materials WHERE band_gap IS NOT NULL)
    AND m.band_gap IS NOT NULL
ORDER BY m.band_gap DESC",
        ),
        QueryDefinition::new(
            "B2",
            "Sb+Te Materials",
            "Materials containing both Antimony (Sb) and Tellurium (Te)",
            r"SELECT
    material_id,
    formula_pretty,
    elements,
    band_gap,
    formation_energy_per_atom,
    crystal_system
FROM materials
WHERE elements LIKE '%Sb%'
    AND elements LIKE '%Te%'
ORDER BY band_gap DESC",
        ),
        QueryDefinition::new(
            "B3",
            "Wide Gap Non-Oxides",
            "Wide band gap materials (>3.0 eV) without Oxygen",
            r"SELECT
    material_id,
    formula_pretty,
    elements,
    band_gap,
    formation_energy_per_atom,
    crystal_system
FROM materials
WHERE band_gap > 3.0
    AND (elements NOT LIKE '%O%' OR elements IS NULL)
    AND band_gap IS NOT NULL
ORDER BY band_gap DESC",
        ),
        QueryDefinition::new(
            "B4",
            "Most Stable 10%",
            "Top 10% most stable materials by formation energy within each crystal system",
            r"WITH ranked AS (
    SELECT
        m.material_id,
        m.formula_pretty,
        m.crystal_system,
        m.formation_energy_per_atom,
        m.band_gap,
        m.is_stable,
        COUNT(*) OVER (PARTITION BY m.crystal_system) AS total_materials_in_system,
        ROW_NUMBER() OVER (
            PARTITION BY m.crystal_system ORDER BY m.formation_energy_per_atom
        ) AS rn,
        GREATEST(1, CEIL(0.10 * COUNT(*) OVER (PARTITION BY m.crystal_system))) AS bottom_10_count
    FROM materials m
    WHERE m.crystal_system IS NOT NULL
        AND m.formation_energy_per_atom IS NOT NULL
),
p10_values AS (
    SELECT
        crystal_system,
        ROUND(MAX(formation_energy_per_atom), 3) AS p10_formation_energy,
        total_materials_in_system
    FROM ranked
    WHERE rn <= bottom_10_count
    GROUP BY crystal_system, total_materials_in_system
)
SELECT
    r.material_id,
    r.formula_pretty,
    r.crystal_system,
    r.formation_energy_per_atom,
    p.p10_formation_energy AS system_10th_percentile,
    r.band_gap,
    r.is_stable,
    r.total_materials_in_system
FROM ranked r
JOIN p10_values p ON r.crystal_system = p.crystal_system
WHERE r.total_materials_in_system >= 3
    AND r.rn <= r.bottom_10_count
ORDER BY r.crystal_system, r.formation_energy_per_atom",
        ),
        QueryDefinition::new(
            "C1",
            "Most Stable per System",
            "Most thermodynamically stable material in each crystal system",
            r"SELECT
    m.crystal_system,
    m.material_id,
    m.formula_pretty,
    m.formation_energy_per_atom,
    m.band_gap
FROM materials m
WHERE m.formation_energy_per_atom = (
        SELECT MIN(formation_energy_per_atom)
        FROM materials m2
        WHERE m2.crystal_system = m.crystal_system
            AND formation_energy_per_atom IS NOT NULL
    )
    AND m.crystal_system IS NOT NULL
ORDER BY m.formation_energy_per_atom",
        ),
        QueryDefinition::new(
            "C2",
            "Band Gap vs System Average",
            "Materials with band gaps above their crystal system average",
            r"SELECT
    material_id,
    formula_pretty,
    crystal_system,
    band_gap AS material_band_gap,
    ROUND(AVG(band_gap) OVER w, 3) AS system_avg_band_gap,
    ROUND(band_gap - AVG(band_gap) OVER w, 3) AS difference_from_system_avg,
    CASE
        WHEN band_gap > AVG(band_gap) OVER w + STDDEV(band_gap) OVER w THEN 'High outlier'
        WHEN band_gap > AVG(band_gap) OVER w THEN 'Above average'
        WHEN band_gap < AVG(band_gap) OVER w - STDDEV(band_gap) OVER w THEN 'Low outlier'
        ELSE 'Below average'
    END AS band_gap_category,
    formation_energy_per_atom,
    is_stable
FROM materials
WHERE crystal_system IS NOT NULL
    AND band_gap IS NOT NULL
WINDOW w AS (PARTITION BY crystal_system)
ORDER BY crystal_system, ABS(band_gap - AVG(band_gap) OVER w) DESC",
        ),
        QueryDefinition::new(
            "C3",
            "5th Period Elements",
            "Materials containing at least one element from the 5th period",
            r"SELECT
    material_id,
    formula_pretty,
    elements,
    band_gap,
    crystal_system,
    formation_energy_per_atom,
    is_stable,
    ROW_NUMBER() OVER (ORDER BY band_gap DESC) AS band_gap_rank,
    DENSE_RANK() OVER (ORDER BY band_gap DESC) AS band_gap_dense_rank,
    NTILE(4) OVER (ORDER BY band_gap DESC) AS band_gap_quartile
FROM materials
WHERE (elements LIKE '%Rb%' OR elements LIKE '%Sr%' OR elements LIKE '%Y%'
        OR elements LIKE '%Zr%' OR elements LIKE '%Nb%' OR elements LIKE '%Mo%'
        OR elements LIKE '%Ru%' OR elements LIKE '%Rh%' OR elements LIKE '%Pd%'
        OR elements LIKE '%Ag%' OR elements LIKE '%Cd%' OR elements LIKE '%In%'
        OR elements LIKE '%Sn%' OR elements LIKE '%Sb%' OR elements LIKE '%Te%'
        OR elements LIKE '%I%')
    AND band_gap IS NOT NULL
ORDER BY band_gap DESC",
        ),
        QueryDefinition::new(
            "C4",
            "Density Moving Average",
            "Materials with 3- and 5-point moving averages of density",
            r"SELECT
    material_id,
    formula_pretty,
    formation_energy_per_atom,
    density,
    ROUND(AVG(density) OVER (
        ORDER BY formation_energy_per_atom
        ROWS BETWEEN 2 PRECEDING AND 2 FOLLOWING
    ), 3) AS moving_avg_density_5pt,
    ROUND(AVG(density) OVER (
        ORDER BY formation_energy_per_atom
        ROWS BETWEEN 1 PRECEDING AND 1 FOLLOWING
    ), 3) AS moving_avg_density_3pt,
    ROW_NUMBER() OVER (ORDER BY formation_energy_per_atom) AS energy_rank,
    crystal_system,
    band_gap
FROM materials
WHERE formation_energy_per_atom IS NOT NULL
    AND density IS NOT NULL
ORDER BY formation_energy_per_atom",
        ),
        QueryDefinition::new(
            "D1",
            "Element Frequency",
            "Frequency of each element in the materials database",
            r"SELECT
    element,
    COUNT(*) AS material_count
FROM (
    SELECT
        material_id,
        TRIM(SUBSTRING_INDEX(SUBSTRING_INDEX(elements, ',', numbers.n), ',', -1)) AS element
    FROM materials
    JOIN (
        SELECT 1 n UNION ALL SELECT 2 UNION ALL SELECT 3 UNION ALL SELECT 4 UNION ALL
        SELECT 5 UNION ALL SELECT 6 UNION ALL SELECT 7 UNION ALL SELECT 8 UNION ALL
        SELECT 9 UNION ALL SELECT 10
    ) numbers
        ON CHAR_LENGTH(elements) - CHAR_LENGTH(REPLACE(elements, ',', '')) >= numbers.n - 1
    WHERE elements IS NOT NULL
) AS element_list
GROUP BY element
ORDER BY material_count DESC",
        ),
        QueryDefinition::new(
            "D2",
            "Binary Compounds",
            "Summary of materials made of exactly two elements",
            r"SELECT
    COUNT(DISTINCT elements) AS unique_binary_pairs,
    COUNT(*) AS total_binary_materials,
    ROUND(AVG(band_gap), 3) AS avg_band_gap_binary,
    ROUND(AVG(formation_energy_per_atom), 3) AS avg_formation_energy_binary,
    COUNT(CASE WHEN is_stable = 1 THEN 1 END) AS stable_binary_count
FROM materials
WHERE nelements = 2
    AND elements IS NOT NULL",
        ),
        QueryDefinition::new(
            "D3",
            "Hexagonal Semiconductors",
            "Stable semiconductors in hexagonal crystal system",
            r"SELECT
    material_id,
    formula_pretty,
    band_gap,
    formation_energy_per_atom,
    energy_above_hull,
    elements
FROM materials
WHERE crystal_system = 'Hexagonal'
    AND band_gap BETWEEN 0.1 AND 3.0
    AND (formation_energy_per_atom < 0 OR is_stable = 1)
ORDER BY band_gap",
        ),
        QueryDefinition::new(
            "D4",
            "Band Gap Outliers",
            "Materials whose band gap is more than two standard deviations from their crystal system mean",
            r"SELECT
    material_id,
    formula_pretty,
    crystal_system,
    band_gap,
    ROUND(AVG(band_gap) OVER w, 3) AS system_avg_band_gap,
    ROUND(STDDEV(band_gap) OVER w, 3) AS system_band_gap_stddev,
    CASE
        WHEN band_gap > AVG(band_gap) OVER w + 2 * STDDEV(band_gap) OVER w THEN 'High outlier'
        WHEN band_gap < AVG(band_gap) OVER w - 2 * STDDEV(band_gap) OVER w THEN 'Low outlier'
        ELSE 'Normal'
    END AS band_gap_outlier_status,
    formation_energy_per_atom,
    is_stable
FROM materials
WHERE crystal_system IS NOT NULL
    AND band_gap IS NOT NULL
WINDOW w AS (PARTITION BY crystal_system)
ORDER BY crystal_system, band_gap",
        ),
        QueryDefinition::new(
            "D5",
            "Stable Hexagonal Semiconductors",
            "Thermodynamically stable semiconductors in hexagonal crystal system, by gap width",
            r"SELECT
    material_id,
    formula_pretty,
    band_gap,
    formation_energy_per_atom,
    energy_above_hull,
    space_group,
    elements,
    density,
    volume,
    CASE
        WHEN band_gap < 1.0 THEN 'Narrow gap'
        WHEN band_gap < 2.0 THEN 'Medium gap'
        ELSE 'Wide gap'
    END AS semiconductor_type
FROM materials
WHERE crystal_system = 'Hexagonal'
    AND band_gap BETWEEN 0.1 AND 3.0
    AND (formation_energy_per_atom < 0 OR is_stable = 1)
    AND formation_energy_per_atom IS NOT NULL
ORDER BY band_gap, formation_energy_per_atom",
        ),
    ]
}
