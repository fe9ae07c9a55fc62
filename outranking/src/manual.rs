/*!

This is the long-form manual for `outranking` and `outrank`.

## The computation

For every criterion `j` and every ordered pair of distinct alternatives
`(a, b)`, the difference `d_j(a, b)` is computed. It is oriented so that a
positive difference always means that `a` is better than `b`: for a
minimized criterion, the raw difference is negated.

The preference function of the criterion turns this difference into a
preference degree `P_j(a, b)` in `[0, 1]`:

| Function                    | Parameters | `P_j(a, b)`                                        |
|-----------------------------|------------|----------------------------------------------------|
| `Usual`                     |            | 1 if d > 0, else 0                                 |
| `U-Shape`                   | q >= 0     | 1 if d > q, else 0                                 |
| `V-Shape`                   | p > 0      | 0 if d <= 0, d / p if d <= p, else 1               |
| `Level`                     | 0 <= q < p | 0 if d <= q, 1/2 if d <= p, else 1                 |
| `V-Shape with Indifference` | 0 <= q < p | 0 if d <= q, (d - q) / (p - q) if d <= p, else 1   |
| `Gaussian`                  | s > 0      | 0 if d <= 0, else 1 - exp(-d² / 2s²)               |

The aggregated preference is the weighted average of the preference
degrees:

```text
pi(a, b) = sum_j w_j P_j(a, b) / sum_j w_j
```

and the flows average over the `n - 1` other alternatives:

```text
phi+(a) = sum_{b != a} pi(a, b) / (n - 1)
phi-(a) = sum_{b != a} pi(b, a) / (n - 1)
phi(a)  = phi+(a) - phi-(a)
```

The ranking sorts the alternatives by decreasing net flow `phi`. Two
alternatives whose net flows differ by less than the indifference threshold
(`1e-4` by default) are reported as indifferent (`I`), otherwise the first
one is preferred (`P`). Alternatives with exactly the same net flow keep
the order in which they were declared.

### Units of the thresholds

With the default `raw` score mode, the thresholds `q`, `p` and `s` are
expressed in the units of the criterion (days, dollars, points on a 1-5
scale, ...).

With the `minMax` score mode, each criterion is first rescaled to `[0, 1]`
with the best observed value at 1 and the worst at 0. The thresholds are
then fractions of the observed range. A criterion on which all the
alternatives have the same score is rescaled to 0 everywhere.

### Flow scaling

Several conventions exist for the divisors. They all induce the same
ranking and only change the magnitude of the flows:

- `standard`: divide by the total weight and by `n - 1` (default)
- `totalWeightOnly`
- `pairCountOnly`
- `unscaled`

## Input formats

The performance table is read from the following formats:
* `csv` Comma Separated Values
* `xlsx` Excel spreadsheets

In both cases, the first row is a header. One column holds the names of
the alternatives and the following columns hold one criterion each, named
by the header:

```text
Supplier,C1 - Cost,C2 - Quality,C3 - Delivery
Acme,1200,4,12
Globex,950,3,20
Initech,1100,5,15
```

Empty cells are missing scores: the ranking is refused until they are
filled. Numbers may use a decimal comma (`4,5`).

For Excel files, the first worksheet is used unless a name is given with
`--excel-worksheet-name` or `excelWorksheetName`.

## Configuration

`outrank` comes with defaults: every column is a criterion with a weight of
1 and the `Usual` preference function. Columns named after one of the
built-in supplier criteria (`outrank --catalog`) take the direction of that
criterion, the other ones are maximized.

A configuration file in JSON controls every option:

```json
{
  "outputSettings": {
    "decisionName": "Packaging supplier 2024",
    "outputFile": "ranking.json",
    "includeDiagnostics": true
  },
  "matrixSource": {
    "provider": "csv",
    "filePath": "suppliers.csv",
    "alternativeColumnIndex": 1,
    "firstCriterionColumnIndex": 2
  },
  "alternatives": [
    { "name": "Acme" },
    { "name": "Globex", "excluded": true }
  ],
  "criteria": [
    { "name": "C1 - Cost", "direction": "minimize", "weight": 3, "function": "V-Shape", "p": 200 },
    { "name": "C2 - Quality", "weight": 2, "function": "Level", "q": 0.5, "p": 1.5 },
    { "name": "C3 - Delivery", "direction": "minimize", "function": "Gaussian", "s": 4 }
  ],
  "rules": {
    "scoreMode": "raw",
    "flowScaling": "standard",
    "indifferenceThreshold": 0.0001
  }
}
```

Notes:
- column indices start at 1. Excel-style letters (`"A"`, `"B"`, ...) are
  also accepted.
- `alternatives` and `criteria` are optional. When given, only the listed
  entries are ranked, in the given order.
- `direction` is `maximize` or `minimize`. `weight` defaults to 1.
- `function` accepts the names of the table above, or `usual`, `uShape`,
  `vShape`, `level`, `vShapeWithIndifference`, `gaussian`. A missing `q`,
  `p` or `s` falls back to 0.1, 0.5 and 0.5 respectively, with a warning.
- `filePath` is relative to the directory of the configuration file.

## Output

The summary is written in JSON. It lists the configured criteria, the
ranking with the three flows of every alternative and the pairwise
relations. With `includeDiagnostics`, it also contains the oriented
difference matrices and the preference matrices of every criterion, the
aggregated preference matrix and the pairwise net flow matrix
`pi(a, b) - pi(b, a)`.

 */
