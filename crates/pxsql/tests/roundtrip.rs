//! Round-trip property: for every accepted statement S,
//! `parse(format(parse(S)))` is structurally equal to `parse(S)`.

use proptest::prelude::*;

fn assert_roundtrip(sql: &str) {
    let first = pxsql::parse_first(sql).unwrap_or_else(|e| panic!("parse failed for {sql:?}: {e}"));
    let canonical = pxsql::format(&first);
    let second = pxsql::parse(&canonical)
        .unwrap_or_else(|e| panic!("re-parse failed for {canonical:?} (from {sql:?}): {e}"));
    assert_eq!(second, first, "round-trip changed the tree for {sql:?} via {canonical:?}");

    // The canonical form is a fixed point.
    assert_eq!(pxsql::format(&second), canonical);
}

const CORPUS: &[&str] = &[
    // Queries
    "SELECT 1",
    "select a, b from t",
    "SELECT DISTINCT a FROM t",
    "SELECT * FROM t WHERE a = 1 AND b < 2 OR c IS NOT NULL",
    "SELECT a AS x, t.b, db.t.c FROM db.t",
    "SELECT t.*, u.* FROM t, u",
    "SELECT COUNT(*), SUM(DISTINCT amount) FROM orders GROUP BY region WITH ROLLUP",
    "SELECT a FROM t GROUP BY a HAVING COUNT(*) > 1 ORDER BY a DESC LIMIT 5, 10",
    "SELECT * FROM t WHERE a BETWEEN 1 AND 10",
    "SELECT * FROM t WHERE a NOT BETWEEN 1 AND 10",
    "SELECT * FROM t WHERE name LIKE 'x%' ESCAPE '!'",
    "SELECT * FROM t WHERE name NOT LIKE '%y'",
    "SELECT * FROM t WHERE a REGEXP '^ab'",
    "SELECT * FROM t WHERE a IN (1, 2, 3)",
    "SELECT * FROM t WHERE a NOT IN (SELECT b FROM u)",
    "SELECT * FROM t WHERE (a, b) IN ((1, 2), (3, 4))",
    "SELECT * FROM t WHERE EXISTS (SELECT 1 FROM u WHERE u.id = t.id)",
    "SELECT * FROM t WHERE NOT EXISTS (SELECT 1 FROM u)",
    "SELECT CASE a WHEN 1 THEN 'one' WHEN 2 THEN 'two' ELSE 'many' END FROM t",
    "SELECT CASE WHEN a > 0 THEN a ELSE -a END FROM t",
    "SELECT CAST(a AS CHAR(10)), CAST(b AS SIGNED), CAST(c AS DECIMAL(10, 2)) FROM t",
    "SELECT CONVERT(a, UNSIGNED), CONVERT(b USING utf8mb4) FROM t",
    "SELECT a COLLATE utf8mb4_bin FROM t",
    "SELECT -a, +b, ~c, !d FROM t",
    "SELECT a + b * c - d / e % f FROM t",
    "SELECT a DIV b, a MOD b FROM t",
    "SELECT a & b | c ^ d, a << 2, b >> 1 FROM t",
    "SELECT a <=> b, a != b, a <> b FROM t",
    "SELECT a XOR b FROM t",
    "SELECT doc -> '$.name', doc ->> '$.id' FROM t",
    "SELECT 'a' 'b' AS joined",
    "SELECT _utf8mb4'x'",
    "SELECT X'CAFE', 0x1F, 0b101, B'01'",
    "SELECT 1.5, .5, 1e10, 1.5E-3",
    "SELECT 18446744073709551615",
    "SELECT NULL, TRUE, FALSE",
    "SELECT ? , :named FROM t WHERE a = ?",
    "SELECT @user_var, @@max_connections, @@GLOBAL.sql_mode",
    "SELECT created + INTERVAL 1 DAY FROM t",
    "SELECT INTERVAL 2 YEAR_MONTH",
    "SELECT INTERVAL(a, 1, 10, 100) FROM t",
    "SELECT CURRENT_TIMESTAMP(), NOW(), DATABASE() FROM t",
    "SELECT HASHFUNC(a, b) FROM t",
    "SELECT NEXT 5 VALUES FROM seq",
    // Joins
    "SELECT * FROM a JOIN b ON a.id = b.id",
    "SELECT * FROM a LEFT JOIN b USING (id, org)",
    "SELECT * FROM a RIGHT JOIN b ON a.id = b.id",
    "SELECT * FROM a CROSS JOIN b",
    "SELECT * FROM a STRAIGHT_JOIN b ON a.id = b.id",
    "SELECT * FROM a NATURAL JOIN b",
    "SELECT * FROM a NATURAL LEFT JOIN b",
    "SELECT * FROM x HASH JOIN y ON x.id = y.id",
    "SELECT * FROM x PARALLEL INNER JOIN y ON x.id = y.id",
    "SELECT * FROM x PARALLEL LEFT JOIN y ON x.id = y.id",
    "SELECT * FROM x PARALLEL RIGHT JOIN y USING (id)",
    "SELECT * FROM (a JOIN b ON a.x = b.x) JOIN c ON c.y = a.y",
    "SELECT * FROM (SELECT a FROM t) AS sub WHERE sub.a > 0",
    "SELECT * FROM t USE INDEX (idx1), u FORCE INDEX FOR JOIN (idx2)",
    "SELECT * FROM t IGNORE INDEX FOR GROUP BY (idx)",
    // Set operations and CTEs
    "SELECT a FROM t UNION SELECT b FROM u",
    "SELECT a FROM t UNION ALL SELECT b FROM u ORDER BY 1 LIMIT 3",
    "SELECT a FROM t EXCEPT SELECT a FROM u",
    "SELECT a FROM t INTERSECT SELECT a FROM u",
    "(SELECT 1 ORDER BY 1) UNION SELECT 2",
    "(SELECT a FROM t LIMIT 1) UNION ALL (SELECT b FROM u LIMIT 1) LIMIT 2",
    "WITH x AS (SELECT 1) SELECT * FROM x",
    "WITH RECURSIVE nums (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM nums) SELECT n FROM nums",
    // Windows
    "SELECT ROW_NUMBER() OVER (ORDER BY id) FROM t",
    "SELECT SUM(x) OVER (PARTITION BY g ORDER BY ts ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM t",
    "SELECT SUM(x) OVER (RANGE BETWEEN 1 PRECEDING AND 2 FOLLOWING) FROM t",
    "SELECT SUM(x) OVER (GROUPS 3 PRECEDING EXCLUDE TIES) FROM t",
    "SELECT RANK() OVER w FROM t WINDOW w AS (ORDER BY score DESC)",
    // Locking
    "SELECT * FROM t WHERE id = 1 FOR UPDATE",
    "SELECT * FROM t LOCK IN SHARE MODE",
    // DML
    "INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y')",
    "INSERT IGNORE INTO t VALUES (1)",
    "INSERT INTO t (a) SELECT b FROM u",
    "INSERT INTO t SET a = 1, b = 'x' ON DUPLICATE KEY UPDATE a = a + 1",
    "REPLACE INTO t (a) VALUES (1)",
    "UPDATE t SET a = 1, b = b + 1 WHERE id = 3 ORDER BY id LIMIT 10",
    "UPDATE t, u SET t.a = u.b WHERE t.id = u.id",
    "DELETE FROM t WHERE id = 3 ORDER BY id DESC LIMIT 1",
    "DELETE t1, t2 FROM t1 JOIN t2 ON t1.id = t2.id WHERE t1.x = 0",
    // DDL
    "CREATE TABLE t (id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT, PRIMARY KEY (id))",
    "CREATE TEMPORARY TABLE IF NOT EXISTS t (a INT NULL DEFAULT 0 COMMENT 'counter')",
    "CREATE TABLE t (name VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL)",
    "CREATE TABLE t (role ENUM('admin', 'user') NOT NULL, flags SET('a', 'b'))",
    "CREATE TABLE t (a INT, b INT, UNIQUE KEY uniq_ab (a, b(4) DESC), KEY k (b)) ENGINE = InnoDB COMMENT = 'demo'",
    "CREATE TABLE t (a INT, CONSTRAINT fk FOREIGN KEY (a) REFERENCES u (id) ON DELETE CASCADE ON UPDATE SET NULL)",
    "CREATE TABLE t2 LIKE t1",
    "CREATE TABLE t3 AS SELECT * FROM t1",
    "CREATE OR REPLACE VIEW v (a, b) AS SELECT x, y FROM t",
    "CREATE UNIQUE INDEX idx ON t (a, b)",
    "CREATE FULLTEXT INDEX ft ON docs (body)",
    "ALTER TABLE t ADD COLUMN c INT NOT NULL FIRST, ADD COLUMN d INT AFTER c",
    "ALTER TABLE t MODIFY COLUMN c BIGINT NULL, CHANGE COLUMN old_c new_c INT",
    "ALTER TABLE t DROP COLUMN c, DROP INDEX idx, DROP PRIMARY KEY, DROP FOREIGN KEY fk",
    "ALTER TABLE t RENAME TO t2, RENAME COLUMN a TO b",
    "ALTER TABLE t ADD CONSTRAINT pk PRIMARY KEY (id)",
    "DROP TABLE IF EXISTS a, b",
    "DROP VIEW IF EXISTS v",
    "DROP INDEX idx ON t",
    "TRUNCATE TABLE t",
    // Session / admin
    "SET @x = 1, GLOBAL max_connections = 100, SESSION sort_buffer_size = DEFAULT",
    "SET NAMES 'utf8mb4' COLLATE 'utf8mb4_general_ci'",
    "SET CHARACTER SET 'utf8'",
    "SHOW DATABASES LIKE 'app%'",
    "SHOW FULL TABLES FROM db",
    "SHOW TABLE STATUS FROM db",
    "SHOW FULL COLUMNS FROM db.t",
    "SHOW CREATE TABLE t",
    "SHOW CREATE VIEW v",
    "SHOW INDEX FROM t",
    "SHOW GLOBAL VARIABLES LIKE 'max%'",
    "SHOW SESSION STATUS",
    "SHOW ENGINES",
    "SHOW COLLATION",
    "SHOW CHARACTER SET",
    "SHOW GRANTS",
    "SHOW FULL PROCESSLIST",
    "SHOW WARNINGS",
    "SHOW ERRORS",
    "USE app",
    // Transactions / prepared
    "BEGIN",
    "START TRANSACTION",
    "COMMIT",
    "ROLLBACK",
    "ROLLBACK TO SAVEPOINT sp1",
    "SAVEPOINT sp1",
    "RELEASE SAVEPOINT sp1",
    "PREPARE s FROM 'SELECT * FROM t WHERE id = ?'",
    "PREPARE s FROM @text",
    "EXECUTE s USING @a, @b",
    "DEALLOCATE PREPARE s",
    // Utility
    "EXPLAIN SELECT * FROM t WHERE a = 1",
    "EXPLAIN FORMAT = JSON SELECT 1",
    "EXPLAIN t",
    "CALL proc(1, 'x')",
    "CALL proc()",
    "LOAD DATA LOCAL INFILE '/tmp/x.csv' REPLACE INTO TABLE t (a, b)",
    "LOCK TABLES t READ, u AS u2 WRITE, v READ LOCAL",
    "UNLOCK TABLES",
    "FLUSH TABLES",
    "FLUSH TABLES t1, t2",
    "FLUSH LOCAL LOGS",
    "FLUSH PRIVILEGES",
    "ANALYZE TABLE t1, t2",
    "OPTIMIZE LOCAL TABLE t",
    "REPAIR TABLE t",
];

#[test]
fn corpus_round_trips() {
    for sql in CORPUS {
        assert_roundtrip(sql);
    }
}

#[test]
fn version_hinted_statement_round_trips() {
    let first = pxsql::parse("/*!50000 SELECT 1 */").unwrap();
    let canonical = pxsql::format(&first);
    assert_eq!(pxsql::parse(&canonical).unwrap(), first);
}

#[test]
fn weird_identifiers_round_trip() {
    assert_roundtrip("SELECT `select`, `we``ird`, `with space` FROM `from`");
    assert_roundtrip("SELECT status, offset, begin FROM warnings");
}

#[test]
fn string_escapes_round_trip() {
    assert_roundtrip(r"SELECT 'it''s', 'tab\there', 'back\\slash'");
}

proptest! {
    // Integer literals of any size survive the trip (i64, u64, and beyond).
    #[test]
    fn integer_literals_round_trip(n in any::<u128>()) {
        assert_roundtrip(&format!("SELECT {n}"));
    }

    // Arbitrary ASCII identifiers in expression position.
    #[test]
    fn identifier_round_trip(name in "[a-z][a-z0-9_]{0,20}") {
        assert_roundtrip(&format!("SELECT `{name}` FROM t"));
    }

    // String literal payloads with quotes and backslashes.
    #[test]
    fn string_literals_round_trip(s in "[ -~]{0,30}") {
        let escaped = s.replace('\\', "\\\\").replace('\'', "''");
        assert_roundtrip(&format!("SELECT '{escaped}'"));
    }

    // Chained comparisons and arithmetic keep their shape.
    #[test]
    fn arithmetic_round_trip(a in 0i64..1000, b in 0i64..1000, c in 1i64..1000) {
        assert_roundtrip(&format!("SELECT {a} + {b} * {c} - {a} / {c}"));
        assert_roundtrip(&format!("SELECT ({a} + {b}) * {c}"));
    }
}
